use formpulse_core::{PageLink, QuestionType, Survey, SurveyEnvelope, SurveyPage};
use serde_json::json;

#[test]
fn survey_deserialize_captures_inspected_fields_and_keeps_rest_opaque() {
    let survey: Survey = serde_json::from_value(json!({
        "id": 7,
        "title": "Team pulse",
        "slug": "team-pulse",
        "image_url": "https://cdn.example.com/7.png",
        "questions": [{"type": "radio", "question": "Mood?"}]
    }))
    .unwrap();

    assert_eq!(survey.id, Some(7));
    assert_eq!(
        survey.image_url.as_deref(),
        Some("https://cdn.example.com/7.png")
    );
    assert_eq!(survey.extra["title"], json!("Team pulse"));
    assert_eq!(survey.extra["questions"][0]["type"], json!("radio"));
    assert!(!survey.extra.contains_key("image_url"));
}

#[test]
fn survey_serialize_never_emits_image_url() {
    let survey: Survey = serde_json::from_value(json!({
        "id": 7,
        "title": "Team pulse",
        "image_url": "https://cdn.example.com/7.png"
    }))
    .unwrap();

    let wire = serde_json::to_value(&survey).unwrap();
    assert_eq!(wire, json!({"id": 7, "title": "Team pulse"}));
}

#[test]
fn unsaved_survey_serializes_without_an_id_key() {
    let survey: Survey = serde_json::from_value(json!({"title": "Draft"})).unwrap();

    assert!(!survey.is_persisted());
    let wire = serde_json::to_value(&survey).unwrap();
    assert_eq!(wire, json!({"title": "Draft"}));
}

#[test]
fn question_type_round_trips_through_wire_names() {
    for kind in QuestionType::ALL {
        let wire = serde_json::to_value(kind).unwrap();
        assert_eq!(wire, json!(kind.as_str()));
        let back: QuestionType = serde_json::from_value(wire).unwrap();
        assert_eq!(back, kind);
        assert_eq!(QuestionType::parse(kind.as_str()), Some(kind));
    }
    assert_eq!(QuestionType::parse("slider"), None);
}

#[test]
fn survey_page_decodes_pagination_links() {
    let page: SurveyPage = serde_json::from_value(json!({
        "data": [{"id": 1, "title": "A"}, {"id": 2, "title": "B"}],
        "meta": {
            "links": [
                {"url": null, "label": "&laquo; Previous", "active": false},
                {"url": "https://api.example.com/survey?page=1", "label": "1", "active": true},
                {"url": "https://api.example.com/survey?page=2", "label": "2", "active": false}
            ]
        }
    }))
    .unwrap();

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.meta.links.len(), 3);
    assert_eq!(
        page.meta.links[1],
        PageLink {
            url: Some("https://api.example.com/survey?page=1".to_string()),
            label: "1".to_string(),
            active: true,
        }
    );
}

#[test]
fn survey_envelope_unwraps_the_data_field() {
    let envelope: SurveyEnvelope =
        serde_json::from_value(json!({"data": {"id": 3, "title": "C"}})).unwrap();
    assert_eq!(envelope.data.id, Some(3));
}
