#[cfg(feature = "serde")]
mod serde_enabled {
    use serde_json::json;
    use updatelog_core::{RawUpdateInfo, SequenceId, ThreadInfo, UpdateData, UpdateInfo};

    #[test]
    fn raw_update_info_uses_the_wire_field_names() {
        let raw = RawUpdateInfo::UpdateThreadReadStatus {
            id: SequenceId(200),
            time: 1000,
            thread_id: "9".into(),
            unread: true,
        };

        let value = serde_json::to_value(&raw).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "UPDATE_THREAD_READ_STATUS",
                "id": "200",
                "time": 1000,
                "threadID": "9",
                "unread": true,
            })
        );
    }

    #[test]
    fn sequence_id_round_trips_as_a_decimal_string() {
        let raw = RawUpdateInfo::DeleteAccount {
            id: SequenceId(57),
            time: 42,
            deleted_user_id: "u1".into(),
        };

        let bytes = serde_json::to_vec(&raw).unwrap();
        assert!(std::str::from_utf8(&bytes).unwrap().contains("\"id\":\"57\""));

        let roundtrip: RawUpdateInfo = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(roundtrip, raw);
    }

    #[test]
    fn update_data_parses_from_tagged_json() {
        let data: UpdateData = serde_json::from_value(json!({
            "type": "BAD_DEVICE_TOKEN",
            "time": 7,
            "deviceToken": "tok-1",
        }))
        .unwrap();

        assert_eq!(
            data,
            UpdateData::BadDeviceToken {
                time: 7,
                device_token: "tok-1".into(),
            }
        );
    }

    #[test]
    fn update_info_embeds_the_resolved_thread() {
        let info = UpdateInfo::JoinThread {
            id: SequenceId(12),
            time: 3,
            thread_info: ThreadInfo { id: "t1".into() },
        };

        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["threadInfo"]["id"], "t1");

        let roundtrip: UpdateInfo = serde_json::from_value(value).unwrap();
        assert_eq!(roundtrip, info);
    }
}
