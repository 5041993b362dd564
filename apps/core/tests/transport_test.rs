use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use chrome_profiles_core::action_executor::RecordingSpawner;
use chrome_profiles_core::config::Config;
use chrome_profiles_core::contract::HostResponse;
use chrome_profiles_core::core_service::CoreService;
use chrome_profiles_core::discovery::{ChromeProfileProvider, FixtureProvider};
use chrome_profiles_core::model::Profile;
use chrome_profiles_core::transport::{handle_json, ErrorCode, TransportResponse};

fn seeded_service() -> CoreService<RecordingSpawner> {
    let provider = FixtureProvider::from_profiles(vec![
        Profile::new("Alice", "a@x.com", Path::new("/chrome/Default")),
        Profile::new("Bob", "b@x.com", Path::new("/chrome/Profile 1")),
    ]);
    CoreService::with_provider(
        Config::default(),
        &provider,
        PathBuf::from("/usr/bin/google-chrome"),
    )
    .unwrap()
    .with_spawner(RecordingSpawner::default())
}

fn parse(raw: &str) -> TransportResponse {
    serde_json::from_str(raw).unwrap()
}

#[test]
fn query_request_returns_ok_render_list() {
    let service = seeded_service();

    let raw = handle_json(&service, r#"{"kind":"query","payload":{"argument":"alice"}}"#);
    assert!(raw.contains("\"status\":\"ok\""));

    match parse(&raw) {
        TransportResponse::Ok {
            response: HostResponse::RenderResultList(list),
        } => {
            assert_eq!(list.items.len(), 2);
            assert_eq!(list.items[0].name, "Alice");
        }
        other => panic!("expected render list, got {other:?}"),
    }
}

#[test]
fn item_enter_request_launches_profile() {
    let service = seeded_service();

    let raw = handle_json(
        &service,
        r#"{"kind":"item_enter","payload":{"action":"open_profile","profile_folder":"/chrome/Profile 1"}}"#,
    );

    assert_eq!(
        parse(&raw),
        TransportResponse::Ok {
            response: HostResponse::DoNothing
        }
    );
    let launched = service.spawner().launched();
    assert_eq!(launched.len(), 1);
    assert_eq!(launched[0].args, vec!["--profile-directory=Profile 1".to_string()]);
}

#[test]
fn malformed_json_returns_invalid_json_code() {
    let service = seeded_service();

    match parse(&handle_json(&service, "{not-json")) {
        TransportResponse::Err { error } => assert_eq!(error.code, ErrorCode::InvalidJson),
        other => panic!("expected invalid json error, got {other:?}"),
    }
}

#[test]
fn unknown_event_returns_invalid_request_code() {
    let service = seeded_service();

    match parse(&handle_json(&service, r#"{"kind":"preferences_update","payload":{}}"#)) {
        TransportResponse::Err { error } => assert_eq!(error.code, ErrorCode::InvalidRequest),
        other => panic!("expected invalid request error, got {other:?}"),
    }
    assert!(service.spawner().launched().is_empty());
}

#[cfg(target_os = "linux")]
#[test]
fn non_utf8_profile_folder_does_not_hide_other_profiles() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let root = std::env::temp_dir().join(format!("chrome-profiles-transport-non-utf8-{unique}"));
    let accounts = [
        (OsStr::new("Default"), "Alice", "a@x.com"),
        (OsStr::from_bytes(b"Profile \xff"), "Bob", "b@x.com"),
    ];
    for (folder, name, email) in accounts {
        let dir = root.join(folder);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("Preferences"),
            format!(r#"{{"account_info":[{{"full_name":"{name}","email":"{email}"}}]}}"#),
        )
        .unwrap();
    }

    let provider = ChromeProfileProvider::new(root.clone());
    let service = CoreService::with_provider(
        Config::default(),
        &provider,
        PathBuf::from("/usr/bin/google-chrome"),
    )
    .unwrap();

    match parse(&handle_json(&service, r#"{"kind":"query","payload":{}}"#)) {
        TransportResponse::Ok {
            response: HostResponse::RenderResultList(list),
        } => {
            let names: Vec<&str> = list.items.iter().map(|i| i.name.as_str()).collect();
            assert_eq!(names, vec!["Alice"]);
        }
        other => panic!("expected render list, got {other:?}"),
    }

    std::fs::remove_dir_all(&root).unwrap();
}

#[cfg(target_os = "linux")]
#[test]
fn unencodable_response_reports_encode_failed() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let folder = Path::new("/chrome").join(OsStr::from_bytes(b"Profile \xff"));
    let provider = FixtureProvider::from_profiles(vec![Profile::new("Bob", "b@x.com", &folder)]);
    let service = CoreService::with_provider(
        Config::default(),
        &provider,
        PathBuf::from("/usr/bin/google-chrome"),
    )
    .unwrap();

    match parse(&handle_json(&service, r#"{"kind":"query","payload":{}}"#)) {
        TransportResponse::Err { error } => assert_eq!(error.code, ErrorCode::EncodeFailed),
        other => panic!("expected encode error, got {other:?}"),
    }
}
