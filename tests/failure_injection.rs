//! Failure injection: broken requests and incomplete catalogs still get
//! exactly one well-formed answer.

use std::path::PathBuf;

use curious_facts_skill::config::SkillConfig;
use curious_facts_skill::handlers::ERROR_SPEECH;
use curious_facts_skill::RequestEnvelope;

mod common;

/// Write a catalog to a unique temp file.
fn write_catalog(contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("strings-{}.toml", uuid::Uuid::new_v4()));
    std::fs::write(&path, contents).unwrap();
    path
}

#[tokio::test]
async fn test_non_json_body_gets_apology() {
    let server = common::start_skill_server(SkillConfig::default()).await;

    let res = server
        .client
        .post(server.url("/"))
        .header("content-type", "application/json")
        .body("{\"request\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let json: serde_json::Value = res.json().await.unwrap();
    assert_eq!(
        json["response"]["reprompt"]["outputSpeech"]["ssml"],
        format!("<speak>{ERROR_SPEECH}</speak>")
    );
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let mut config = SkillConfig::default();
    config.listener.max_body_bytes = 64;
    let server = common::start_skill_server(config).await;

    let res = server
        .client
        .post(server.url("/"))
        .body(vec![b' '; 4096])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 413);
}

#[tokio::test]
async fn test_missing_translation_falls_back_then_apologizes() {
    let path = write_catalog(
        r#"
[en]
WELCOME_MESSAGE = "Hi there"
REFLECTOR_MESSAGE = "Triggered %s"

[es]
REFLECTOR_MESSAGE = "Activado %s"
"#,
    );
    let mut config = SkillConfig::default();
    config.localization.strings_path = Some(path.to_string_lossy().into_owned());
    let server = common::start_skill_server(config).await;

    // Key absent in Spanish: the English text is used.
    let response = server.invoke(&RequestEnvelope::launch("es-ES")).await;
    assert_eq!(response.speech_text(), Some("Hi there"));

    // Spanish bundle still wins where it has the key.
    let response = server.invoke(&RequestEnvelope::intent("XYZ", "es-ES")).await;
    assert_eq!(response.speech_text(), Some("Activado XYZ"));

    // Key absent everywhere: the boundary apologizes.
    let response = server
        .invoke(&RequestEnvelope::intent("AMAZON.HelpIntent", "es-ES"))
        .await;
    assert_eq!(response.speech_text(), Some(ERROR_SPEECH));
    assert_eq!(response.reprompt_text(), Some(ERROR_SPEECH));

    // No facts configured: GetFact apologizes too.
    let response = server.invoke(&RequestEnvelope::intent("GetFact", "en-US")).await;
    assert_eq!(response.speech_text(), Some(ERROR_SPEECH));

    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn test_server_survives_repeated_failures() {
    let server = common::start_skill_server(SkillConfig::default()).await;

    for _ in 0..10 {
        let res = server.client.post(server.url("/")).body("nope").send().await.unwrap();
        assert_eq!(res.status(), 200);
    }

    let response = server.invoke(&RequestEnvelope::intent("XYZ", "en-US")).await;
    assert_eq!(response.speech_text(), Some("You just triggered XYZ"));
}
