// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! End-to-end use of the client the way an embedding webhook server would:
//! verify, decode, then act on finished epics.

use clubhouse_client::{
	compute_signature, ClubhouseApi, ClubhouseClient, ClubhouseConfig, ClubhouseError, EpicState,
	MockCall, MockClubhouseClient, Webhook, WebhookAction,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SECRET: &str = "testsecret";
const BODY: &str = r#"{"actions": [
	{"entity_type": "epic", "action": "update", "name": "Test Epic", "changes": {"state": {"new": "done"}}},
	{"entity_type": "epic", "action": "update", "name": "Still going", "changes": {"state": {"new": "in progress"}}}
]}"#;

/// Create a retrospective epic for every epic the webhook marks done.
async fn handle_delivery(
	api: &dyn ClubhouseApi,
	signature: &str,
	body: &[u8],
) -> Result<Vec<String>, ClubhouseError> {
	api.verify_signature(signature, body)?;
	let webhook = api.parse_webhook(Box::new(body))?;

	let mut created = Vec::new();
	for action in webhook.epic_updates() {
		if action.new_state() == Some(&EpicState::Done) {
			let epic = api
				.create_epic(
					&format!("Retro: {}", action.name),
					"Follow-up for a finished epic",
				)
				.await?;
			created.push(epic.name);
		}
	}
	Ok(created)
}

#[tokio::test]
async fn real_client_against_local_server() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/epics"))
		.and(header("Clubhouse-Token", "abc123"))
		.and(body_json(serde_json::json!({
			"name": "Retro: Test Epic",
			"description": "Follow-up for a finished epic"
		})))
		.respond_with(ResponseTemplate::new(201))
		.expect(1)
		.mount(&server)
		.await;

	let config = ClubhouseConfig::new("abc123")
		.with_webhook_secret(SECRET)
		.try_with_base_url(server.uri())
		.unwrap();
	let client = ClubhouseClient::new(config).unwrap();

	let signature = compute_signature(SECRET.as_bytes(), BODY.as_bytes());
	let created = handle_delivery(&client, &signature, BODY.as_bytes())
		.await
		.unwrap();

	assert_eq!(created, ["Retro: Test Epic"]);
}

#[tokio::test]
async fn forged_delivery_is_rejected_before_any_request() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(201))
		.expect(0)
		.mount(&server)
		.await;

	let config = ClubhouseConfig::new("abc123")
		.with_webhook_secret(SECRET)
		.try_with_base_url(server.uri())
		.unwrap();
	let client = ClubhouseClient::new(config).unwrap();

	let forged = compute_signature(b"bad secret", BODY.as_bytes());
	let err = handle_delivery(&client, &forged, BODY.as_bytes())
		.await
		.unwrap_err();

	assert!(err.is_signature_mismatch());
}

#[tokio::test]
async fn mock_client_drives_the_same_handler() {
	let webhook = Webhook {
		actions: vec![WebhookAction {
			entity_type: "epic".into(),
			action: "update".into(),
			name: "Mocked".to_string(),
			changes: clubhouse_client::Changes {
				state: Some(clubhouse_client::StateChange {
					old: None,
					new: Some(EpicState::Done),
				}),
			},
			..Default::default()
		}],
		..Default::default()
	};
	let mock = MockClubhouseClient::new()
		.with_webhook(webhook)
		.with_epic(clubhouse_client::Epic::new("Retro: Mocked", "canned"));

	let created = handle_delivery(&mock, "any", b"ignored").await.unwrap();

	assert_eq!(created, ["Retro: Mocked"]);
	assert_eq!(
		mock.get_calls(),
		vec![
			MockCall::VerifySignature {
				signature: "any".to_string()
			},
			MockCall::ParseWebhook,
			MockCall::CreateEpic {
				name: "Retro: Mocked".to_string(),
				description: "Follow-up for a finished epic".to_string(),
			},
		]
	);
}

#[tokio::test]
async fn mock_create_failure_propagates() {
	let webhook: Webhook = serde_json::from_str(BODY).unwrap();
	let mock = MockClubhouseClient::new()
		.with_webhook(webhook)
		.with_create_epic_error();

	let err = handle_delivery(&mock, "any", BODY.as_bytes())
		.await
		.unwrap_err();

	assert!(matches!(err, ClubhouseError::Api { .. }));
}
