use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::timeout;
use yuedu_config::Config;
use yuedu_lang_chinese::{CedictLoader, ChineseProcessor};

use crate::controller::AppController;
use crate::state::AppState;

async fn serve_lines(input: &'static str, processor: Option<Arc<ChineseProcessor>>) -> Vec<Value> {
    let (writer, read_half) = tokio::io::duplex(64 * 1024);
    let controller = AppController::new(Arc::new(AppState::new(Config::default())), 8);
    let mut tasks = controller.spawn_tasks(processor, input.as_bytes(), writer);

    let all_done = async {
        while let Some(joined) = tasks.join_next().await {
            joined.expect("task panicked").expect("task failed");
        }
    };
    timeout(Duration::from_secs(5), all_done)
        .await
        .expect("serve did not stop after EOF");

    let mut lines = BufReader::new(read_half).lines();
    let mut messages = Vec::new();
    while let Some(line) = lines.next_line().await.unwrap() {
        messages.push(serde_json::from_str(&line).unwrap());
    }
    messages
}

#[tokio::test]
async fn test_serve_answers_every_line_then_stops() {
    let dict = CedictLoader::load_embedded().unwrap();
    let processor = Arc::new(ChineseProcessor::new(dict, &Default::default()));

    let messages = serve_lines("?学生\n\n你好世界\n", Some(processor)).await;
    assert_eq!(messages.len(), 2);

    assert_eq!(messages[0]["type"], "entry");
    assert_eq!(messages[0]["id"], 1);
    assert_eq!(messages[0]["summary"]["term"], "学生");

    assert_eq!(messages[1]["type"], "segments");
    assert_eq!(messages[1]["id"], 3);
    let tokens = messages[1]["tokens"].as_array().unwrap();
    assert_eq!(tokens[0]["text"], "你好");
    assert_eq!(tokens[0]["start"], 0);
}

#[tokio::test]
async fn test_serve_without_dictionary() {
    let messages = serve_lines("你好\n?你好\n", None).await;
    assert_eq!(messages.len(), 2);
    assert!(messages.iter().all(|m| m["type"] == "unavailable"));
}
