mod common;

use common::{every_action, main_actions, renderer_actions};
use dlqueue::{Action, ActionKind, Error, Origin};
use serde_json::json;

#[test]
fn test_main_builds_restricted_actions() {
    let main = main_actions();

    let action = main.start_download("http://a").unwrap();
    assert_eq!(action.origin, Some(Origin::Main));
    assert_eq!(
        action.kind,
        ActionKind::StartDownload {
            url: "http://a".into()
        }
    );

    assert_eq!(main.init().unwrap().tag(), "init");
    assert_eq!(main.shutdown().unwrap().tag(), "shutdown");
    assert_eq!(main.finish_download("http://a").unwrap().tag(), "finishDownload");
    assert_eq!(main.download_error("http://a", "x").unwrap().tag(), "downloadError");
    assert_eq!(
        main.download_prepared("http://a", json!({})).unwrap().tag(),
        "downloadPrepared"
    );
}

#[test]
fn test_renderer_cannot_build_restricted_actions() {
    let renderer = renderer_actions();

    let results = [
        ("init", renderer.init()),
        ("shutdown", renderer.shutdown()),
        ("startDownload", renderer.start_download("http://a")),
        ("finishDownload", renderer.finish_download("http://a")),
        (
            "downloadPrepared",
            renderer.download_prepared("http://a", json!({"title": "t"})),
        ),
        ("downloadError", renderer.download_error("http://a", "boom")),
    ];

    for (tag, result) in results {
        match result {
            Err(Error::OriginViolation { action, required }) => {
                assert_eq!(action, tag);
                assert_eq!(required, Origin::Main);
            }
            other => panic!("{tag}: expected origin violation, got {other:?}"),
        }
    }
}

#[test]
fn test_origin_violation_message_names_action_and_origin() {
    let err = renderer_actions().finish_download("http://a").unwrap_err();
    assert_eq!(
        err.to_string(),
        "action finishDownload should only be created in the main process"
    );
}

#[test]
fn test_unrestricted_actions_from_either_process() {
    for factory in [main_actions(), renderer_actions()] {
        let origin = factory.origin();
        let actions = [
            factory.enqueue_download("http://a"),
            factory.cancel_download("http://a"),
            factory.retry_download("http://a"),
            factory.log("hi"),
            factory.download_log("http://a", "hi"),
        ];
        for action in actions {
            assert_eq!(action.origin, Some(origin));
            action.check_origin().unwrap();
        }
    }
}

#[test]
fn test_download_log_uses_urllog_tag() {
    let action = renderer_actions().download_log("http://a", "50%");
    assert_eq!(action.tag(), "urllog");
    assert_eq!(action.kind.url(), Some("http://a"));
}

#[test]
fn test_required_origin_table() {
    let restricted: Vec<&str> = every_action()
        .iter()
        .filter(|a| a.kind.required_origin() == Some(Origin::Main))
        .map(|a| a.tag())
        .collect();
    assert_eq!(
        restricted,
        vec![
            "init",
            "shutdown",
            "startDownload",
            "finishDownload",
            "downloadPrepared",
            "downloadError"
        ]
    );
}

#[test]
fn test_wire_shape() {
    let action = renderer_actions().enqueue_download("http://a");
    let value: serde_json::Value = serde_json::from_str(&action.to_json().unwrap()).unwrap();
    assert_eq!(
        value,
        json!({"type": "enqueueDownload", "url": "http://a", "origin": "renderer"})
    );

    let prepared = main_actions()
        .download_prepared("http://a", json!({"title": "A", "formats": [1, 2]}))
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&prepared.to_json().unwrap()).unwrap();
    assert_eq!(
        value,
        json!({
            "type": "downloadPrepared",
            "url": "http://a",
            "videoInfo": {"title": "A", "formats": [1, 2]},
            "origin": "main"
        })
    );
}

#[test]
fn test_origin_omitted_when_absent() {
    let action = Action::unstamped(ActionKind::Log {
        message: "hi".into(),
    });
    assert_eq!(action.to_json().unwrap(), r#"{"type":"log","message":"hi"}"#);
}

#[test]
fn test_decode_every_action() {
    for action in every_action() {
        let json = action.to_json().unwrap();
        let decoded = Action::from_json(&json).unwrap();
        assert_eq!(decoded, action, "{json}");
    }
}

#[test]
fn test_decode_bootstrap_tag() {
    let action = Action::from_json(r#"{"type":"@@redux/INIT"}"#).unwrap();
    assert_eq!(action.kind, ActionKind::ReduxInit);
    assert_eq!(action.origin, None);
    action.check_origin().unwrap();
}

#[test]
fn test_decode_rejects_unknown_tag() {
    let err = Action::from_json(r#"{"type":"deleteEverything"}"#).unwrap_err();
    assert!(matches!(err, Error::Wire(_)));
}

#[test]
fn test_decode_rejects_missing_field() {
    let err = Action::from_json(r#"{"type":"cancelDownload"}"#).unwrap_err();
    assert!(matches!(err, Error::Wire(_)));
}

#[test]
fn test_inbound_restricted_action_from_renderer_is_rejected() {
    let forged = Action::from_json(
        r#"{"type":"finishDownload","url":"http://a","origin":"renderer"}"#,
    )
    .unwrap();
    let err = forged.check_origin().unwrap_err();
    assert!(matches!(
        err,
        Error::OriginViolation {
            action: "finishDownload",
            required: Origin::Main
        }
    ));
}

#[test]
fn test_inbound_restricted_action_without_origin_is_rejected() {
    let unstamped = Action::from_json(r#"{"type":"shutdown"}"#).unwrap();
    assert!(unstamped.check_origin().is_err());
}

#[test]
fn test_origin_parse() {
    assert_eq!("main".parse::<Origin>().unwrap(), Origin::Main);
    assert_eq!(" renderer\n".parse::<Origin>().unwrap(), Origin::Renderer);
    assert!(matches!("Main".parse::<Origin>(), Err(Error::Config(_))));
}
