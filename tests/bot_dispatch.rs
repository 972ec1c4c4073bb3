//! Update dispatch against a mock Bot API.
//!
//! The mock server plays both the Telegram Bot API and the release hosts, so
//! each test drives a real `Bot` through `handle_update` and checks the calls
//! it makes.

mod helpers;

use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use craftrom_bot::bot::{ACCEPTED_REPLY, ADMIN_ONLY_REPLY};
use craftrom_bot::initialization::init_client;
use craftrom_bot::registry::ChannelRecord;
use craftrom_bot::telegram::{BotApi, Update};
use craftrom_bot::Bot;
use helpers::{catalog_server, config_for, listing_page, listing_row, mount_listing};

const TOKEN: &str = "TEST:TOKEN";
const CHAT_ID: i64 = -1001;
const TOPIC_ID: i64 = 77;

fn api_path(method_name: &str) -> String {
    format!("/bot{TOKEN}/{method_name}")
}

fn ok(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": result}))
}

fn sent_message() -> Value {
    json!({
        "message_id": 500,
        "chat": {"id": CHAT_ID, "type": "supergroup", "title": "CraftRom"},
        "text": "ok"
    })
}

fn text_update(user_id: i64, thread: Option<i64>, text: &str) -> Update {
    serde_json::from_value(json!({
        "update_id": 1,
        "message": {
            "message_id": 42,
            "message_thread_id": thread,
            "from": {"id": user_id, "is_bot": false, "first_name": "Tester"},
            "chat": {"id": CHAT_ID, "type": "supergroup", "title": "CraftRom"},
            "text": text
        }
    }))
    .expect("valid update")
}

async fn bot_for(server: &MockServer, registry_dir: &TempDir) -> Bot {
    let mut config = config_for(server);
    config.registry_path = registry_dir.path().join("channels.json");
    let http = init_client(&config).expect("client");
    let api = BotApi::new(http.clone(), &config.api_base_url, TOKEN);
    Bot::new(&config, http, api, "craft_bot")
}

async fn mount_admins(server: &MockServer, admins: Value) {
    Mock::given(method("POST"))
        .and(path(api_path("getChatAdministrators")))
        .respond_with(ok(admins))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_rom_command_replies_with_report() {
    let server = catalog_server().await;
    mount_listing(
        &server,
        "/files/lavender/uther/",
        listing_page(&[listing_row(
            "CraftRom-lavender.zip",
            "1.5 GB",
            "2024-06-01 09:00:00 UTC",
            "/lavender/download",
        )]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(api_path("sendMessage")))
        .and(body_partial_json(json!({
            "chat_id": CHAT_ID,
            "parse_mode": "HTML",
            "reply_parameters": {"message_id": 42},
            "link_preview_options": {"is_disabled": true}
        })))
        .respond_with(ok(sent_message()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("temp dir");
    let bot = bot_for(&server, &dir).await;

    let text = bot.rom_reply(Some("lavender")).await;
    assert!(text.contains("CraftRom-lavender.zip"));
    assert!(text.contains("06/01/2024"));

    bot.handle_update(text_update(7, None, "/rom@craft_bot lavender"))
        .await;
}

#[tokio::test]
async fn test_rom_without_argument_lists_devices() {
    let server = catalog_server().await;
    let dir = TempDir::new().expect("temp dir");
    let bot = bot_for(&server, &dir).await;

    let text = bot.rom_reply(None).await;
    assert!(text.contains("Please specify the device code."));
    assert!(text.contains("onclite, lavender, ginkgo"));
}

#[tokio::test]
async fn test_rom_reports_catalog_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/catalog.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    let dir = TempDir::new().expect("temp dir");
    let bot = bot_for(&server, &dir).await;

    assert!(bot.rom_reply(Some("onclite")).await.starts_with("<b>Error:</b> "));
}

#[tokio::test]
async fn test_admin_command_from_regular_member_is_refused() {
    let server = MockServer::start().await;
    mount_admins(
        &server,
        json!([{"status": "creator", "user": {"id": 1, "is_bot": false, "first_name": "Owner"}}]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(api_path("sendMessage")))
        .and(body_partial_json(json!({"text": ADMIN_ONLY_REPLY})))
        .respond_with(ok(sent_message()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("banChatMember")))
        .respond_with(ok(json!(true)))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("temp dir");
    let bot = bot_for(&server, &dir).await;
    bot.handle_update(text_update(99, None, "/clean")).await;
}

#[tokio::test]
async fn test_clean_bans_deleted_accounts() {
    let server = MockServer::start().await;
    mount_admins(
        &server,
        json!([
            {"status": "creator", "user": {"id": 1, "is_bot": false, "first_name": "Owner"}},
            {"status": "administrator", "user": {"id": 2, "is_bot": false, "first_name": "Deleted Account"}}
        ]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(api_path("banChatMember")))
        .and(body_partial_json(json!({"chat_id": CHAT_ID, "user_id": 2})))
        .respond_with(ok(json!(true)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("sendMessage")))
        .and(body_partial_json(json!({"text": "Cleaned up 1 deleted accounts."})))
        .respond_with(ok(sent_message()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("temp dir");
    let bot = bot_for(&server, &dir).await;
    bot.handle_update(text_update(1, None, "/clean")).await;
}

#[tokio::test]
async fn test_init_registers_chat_with_owner() {
    let server = MockServer::start().await;
    mount_admins(
        &server,
        json!([{"status": "creator", "user": {"id": 1, "is_bot": false, "first_name": "Owner"}}]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(api_path("sendMessage")))
        .respond_with(ok(sent_message()))
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("temp dir");
    let bot = bot_for(&server, &dir).await;
    bot.handle_update(text_update(1, None, "/init")).await;

    let record = bot
        .registry()
        .find(CHAT_ID)
        .await
        .expect("registry readable")
        .expect("chat registered");
    assert_eq!(record.owner_id, Some(1));
    assert_eq!(record.channel_title, "CraftRom");
    assert_eq!(record.topic_suggestion, None);

    // A second /init leaves the single record in place
    bot.handle_update(text_update(1, None, "/init")).await;
    assert_eq!(bot.registry().load().await.expect("registry").len(), 1);
}

async fn registered_bot(server: &MockServer, dir: &TempDir) -> Bot {
    let bot = bot_for(server, dir).await;
    bot.registry()
        .register(ChannelRecord {
            channel_id: CHAT_ID.to_string(),
            owner_id: Some(1),
            channel_title: "CraftRom".to_string(),
            topic_suggestion: Some(TOPIC_ID),
        })
        .await
        .expect("register");
    bot
}

#[tokio::test]
async fn test_untagged_message_in_suggestion_topic_is_deleted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("deleteMessage")))
        .and(body_partial_json(json!({"chat_id": CHAT_ID, "message_id": 42})))
        .respond_with(ok(json!(true)))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("temp dir");
    let bot = registered_bot(&server, &dir).await;
    bot.handle_update(text_update(5, Some(TOPIC_ID), "just chatting"))
        .await;
}

#[tokio::test]
async fn test_tagged_suggestion_is_acknowledged_in_topic() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("sendMessage")))
        .and(body_partial_json(json!({
            "text": ACCEPTED_REPLY,
            "message_thread_id": TOPIC_ID
        })))
        .respond_with(ok(sent_message()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("deleteMessage")))
        .respond_with(ok(json!(true)))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("temp dir");
    let bot = registered_bot(&server, &dir).await;
    bot.handle_update(text_update(5, Some(TOPIC_ID), "#suggestion dark mode"))
        .await;
}

#[tokio::test]
async fn test_messages_outside_topic_are_left_alone() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ok(json!(true)))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("temp dir");
    let bot = registered_bot(&server, &dir).await;
    bot.handle_update(text_update(5, None, "hello everyone")).await;
    bot.handle_update(text_update(5, Some(3), "off topic")).await;
}
