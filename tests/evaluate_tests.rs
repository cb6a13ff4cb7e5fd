//! End-to-end tests for `AnalysisClient::evaluate` against fake providers.

mod common;

#[cfg(test)]
mod evaluate_tests {
    use super::common::{
        CannedAnalyzer, ContentAwareAnalyzer, JPEG_BYTES, PNG_BYTES, write_image,
    };
    use catlens::{AnalysisClient, AnalysisResult, CatLensError, Detection, ImageTag};
    use std::sync::Arc;

    async fn evaluate_reply(reply: &str) -> catlens::Result<AnalysisResult> {
        let dir = tempfile::tempdir().unwrap();
        let path = write_image(&dir, "cat.jpg", JPEG_BYTES);
        let client = AnalysisClient::new(CannedAnalyzer::new(reply));
        client.evaluate(&path).await
    }

    #[tokio::test]
    async fn test_not_a_cat_is_a_success() {
        let result = evaluate_reply(r#"{"is_cat": false}"#)
            .await
            .expect("is_cat false must not be an error");

        assert_eq!(
            result,
            AnalysisResult {
                is_cat: false,
                image_tags: None,
                color_codes: None,
                breed_type: None,
                age: None,
            }
        );
        assert_eq!(result.detection(), Detection::NoCat);
    }

    #[tokio::test]
    async fn test_full_result_field_for_field() {
        let result = evaluate_reply(
            r##"{"is_cat": true, "image_tags": ["SIT","FRONT_ANGLE"], "color_codes": ["#000000","#FFFFFF"], "breed_type": "러시안블루", "age": 12}"##,
        )
        .await
        .unwrap();

        assert_eq!(
            result,
            AnalysisResult {
                is_cat: true,
                image_tags: Some(vec!["SIT".to_string(), "FRONT_ANGLE".to_string()]),
                color_codes: Some(vec!["#000000".to_string(), "#FFFFFF".to_string()]),
                breed_type: Some("러시안블루".to_string()),
                age: Some(12),
            }
        );
        assert_eq!(result.known_tags(), vec![ImageTag::Sit, ImageTag::FrontAngle]);
    }

    #[tokio::test]
    async fn test_order_and_duplicates_preserved() {
        let result = evaluate_reply(
            r##"{"is_cat": true, "image_tags": ["FULL_SHOT", "SIT", "SIT"], "color_codes": ["#FFFFFF", "#000000", "#FFFFFF"]}"##,
        )
        .await
        .unwrap();

        assert_eq!(
            result.image_tags.as_deref().unwrap(),
            ["FULL_SHOT", "SIT", "SIT"]
        );
        assert_eq!(
            result.color_codes.as_deref().unwrap(),
            ["#FFFFFF", "#000000", "#FFFFFF"]
        );
    }

    #[tokio::test]
    async fn test_truncated_json_is_schema_violation() {
        let err = evaluate_reply(r#"{"is_cat": true, "image_tags": ["SIT""#)
            .await
            .unwrap_err();
        assert!(err.is_schema_violation(), "got {err:?}");
    }

    #[tokio::test]
    async fn test_plain_text_is_schema_violation() {
        let err = evaluate_reply("I think this is a cat.").await.unwrap_err();
        assert!(err.is_schema_violation(), "got {err:?}");
    }

    #[tokio::test]
    async fn test_missing_is_cat_is_schema_violation() {
        let err = evaluate_reply("{}").await.unwrap_err();
        assert_eq!(
            err,
            CatLensError::SchemaViolation("$: missing required field `is_cat`".to_string())
        );
    }

    #[tokio::test]
    async fn test_non_boolean_is_cat_is_schema_violation() {
        for reply in [r#"{"is_cat": "true"}"#, r#"{"is_cat": 1}"#, r#"{"is_cat": null}"#] {
            let err = evaluate_reply(reply).await.unwrap_err();
            assert!(err.is_schema_violation(), "{reply} gave {err:?}");
        }
    }

    #[tokio::test]
    async fn test_string_age_is_rejected() {
        let err = evaluate_reply(r#"{"is_cat": true, "age": "12"}"#)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            CatLensError::SchemaViolation("$.age: expected integer, found string".to_string())
        );
    }

    #[tokio::test]
    async fn test_fractional_and_negative_age_are_rejected() {
        for reply in [r#"{"is_cat": true, "age": 12.5}"#, r#"{"is_cat": true, "age": -3}"#] {
            let err = evaluate_reply(reply).await.unwrap_err();
            assert!(err.is_schema_violation(), "{reply} gave {err:?}");
        }
    }

    #[tokio::test]
    async fn test_wrongly_typed_lists_are_rejected() {
        for reply in [
            r#"{"is_cat": true, "image_tags": "SIT"}"#,
            r#"{"is_cat": true, "color_codes": [0]}"#,
            r#"{"is_cat": true, "breed_type": ["랙돌"]}"#,
        ] {
            let err = evaluate_reply(reply).await.unwrap_err();
            assert!(err.is_schema_violation(), "{reply} gave {err:?}");
        }
    }

    #[tokio::test]
    async fn test_unknown_tags_pass_through() {
        let result = evaluate_reply(r#"{"is_cat": true, "image_tags": ["SIT", "YAWNING"]}"#)
            .await
            .unwrap();
        assert_eq!(result.known_tags(), vec![ImageTag::Sit]);
        assert_eq!(result.unknown_tags(), vec!["YAWNING"]);
    }

    #[tokio::test]
    async fn test_fenced_json_and_extra_fields_are_accepted() {
        let result = evaluate_reply("```json\n{\"is_cat\": true, \"mood\": \"sleepy\"}\n```")
            .await
            .unwrap();
        assert!(result.is_cat);
        assert_eq!(result.image_tags, None);
    }

    #[tokio::test]
    async fn test_unreadable_image_never_reaches_provider() {
        let dir = tempfile::tempdir().unwrap();
        let analyzer = Arc::new(CannedAnalyzer::new(r#"{"is_cat": true}"#));
        let client = AnalysisClient::new(Arc::clone(&analyzer));

        let missing = client.evaluate(dir.path().join("missing.jpg")).await;
        assert!(matches!(missing, Err(CatLensError::Image(_))));

        let empty = write_image(&dir, "empty.jpg", b"");
        assert!(matches!(client.evaluate(&empty).await, Err(CatLensError::Image(_))));

        let text = write_image(&dir, "notes.txt", b"not an image");
        assert!(matches!(client.evaluate(&text).await, Err(CatLensError::Image(_))));

        assert_eq!(analyzer.calls(), 0);
    }

    #[tokio::test]
    async fn test_every_call_reaches_provider() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_image(&dir, "cat.jpg", JPEG_BYTES);
        let analyzer = Arc::new(CannedAnalyzer::new(r#"{"is_cat": true}"#));
        let client = AnalysisClient::new(Arc::clone(&analyzer));

        let first = client.evaluate(&path).await.unwrap();
        let second = client.evaluate(&path).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(analyzer.calls(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_calls_do_not_mix_results() {
        let dir = tempfile::tempdir().unwrap();
        let png = write_image(&dir, "lying.png", PNG_BYTES);
        let jpeg = write_image(&dir, "empty_room.jpg", JPEG_BYTES);
        let client = Arc::new(AnalysisClient::new(ContentAwareAnalyzer));

        let slow = {
            let client = Arc::clone(&client);
            let png = png.clone();
            tokio::spawn(async move { client.evaluate(&png).await })
        };
        let fast = {
            let client = Arc::clone(&client);
            let jpeg = jpeg.clone();
            tokio::spawn(async move { client.evaluate(&jpeg).await })
        };

        let (slow, fast) = (slow.await.unwrap().unwrap(), fast.await.unwrap().unwrap());

        assert!(slow.is_cat);
        assert_eq!(slow.breed_type.as_deref(), Some("랙돌"));
        assert_eq!(slow.age, Some(30));
        assert!(!fast.is_cat);
        assert_eq!(fast.breed_type, None);
    }
}
