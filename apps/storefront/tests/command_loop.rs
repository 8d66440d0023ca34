//! Drives the stdin/stdout loop against a snapshot file in a temp dir.

use std::io::Cursor;

use serde_json::Value;
use storefront::serve;
use storefront::state::{AppConfig, CartState};
use storefront_store::{FileCartStore, StoreConfig};
use tempfile::TempDir;

fn run_session(dir: &TempDir, input: &str) -> Vec<Value> {
    let store = FileCartStore::new(StoreConfig::new(dir.path().join("cart.json")));
    let cart = CartState::open(store);
    let mut output = Vec::new();

    serve(&cart, &AppConfig::default(), Cursor::new(input), &mut output).unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn shopping_session_round_trip() {
    let dir = TempDir::new().unwrap();
    let input = r#"
{"command":"add_to_cart","product":{"id":1,"title":"Mug","price":10,"stock":5},"quantity":3}
{"command":"add_to_cart","product":{"id":1,"title":"Mug","price":10,"stock":5},"quantity":3}
{"command":"add_to_cart","product":{"id":"2","title":"Lamp","price":50,"stock":4,"discountPercentage":20}}
{"command":"update_cart_item","productId":1,"quantity":5}
{"command":"get_cart"}
"#;

    let replies = run_session(&dir, input);
    assert_eq!(replies.len(), 5);

    assert_eq!(replies[0]["items"][0]["quantity"], 3);
    assert_eq!(replies[0]["notifications"][0]["level"], "success");

    assert_eq!(replies[1]["items"][0]["quantity"], 3);
    assert_eq!(replies[1]["notifications"][0]["level"], "error");
    assert_eq!(
        replies[1]["notifications"][0]["message"],
        "Only 5 of Mug available in stock"
    );

    let last = &replies[4];
    assert_eq!(last["totals"]["itemCount"], 6);
    assert_eq!(last["totals"]["subtotalCents"], 10000);
    assert_eq!(last["totals"]["discountCents"], 1000);
    assert_eq!(last["totals"]["totalCents"], 9000);
    assert_eq!(last["formattedTotal"], "$90.00");
    assert!(last["notifications"].as_array().unwrap().is_empty());

    // A new process sees the same cart.
    let reopened = run_session(&dir, "{\"command\":\"get_cart\"}\n");
    assert_eq!(reopened[0]["items"], last["items"]);
}

#[test]
fn bad_lines_get_error_replies_and_loop_continues() {
    let dir = TempDir::new().unwrap();
    let input = "not json\n\n{\"command\":\"checkout\"}\n{\"command\":\"add_to_cart\",\"product\":{\"id\":\"1\",\"title\":\"  \",\"price\":1,\"stock\":1}}\n{\"command\":\"get_cart\"}\n";

    let replies = run_session(&dir, input);
    assert_eq!(replies.len(), 4);

    assert_eq!(replies[0]["code"], "BAD_REQUEST");
    assert_eq!(replies[1]["code"], "BAD_REQUEST");
    assert_eq!(replies[2]["code"], "VALIDATION_ERROR");
    assert!(replies[3]["items"].as_array().unwrap().is_empty());
}

#[test]
fn corrupt_snapshot_starts_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("cart.json"), "{\"lines\": 3}").unwrap();

    let replies = run_session(&dir, "{\"command\":\"get_cart\"}\n{\"command\":\"clear_cart\"}\n");

    assert!(replies[0]["items"].as_array().unwrap().is_empty());
    assert_eq!(replies[1]["notifications"][0]["message"], "Cart cleared");
    assert_eq!(
        std::fs::read_to_string(dir.path().join("cart.json")).unwrap(),
        "[]"
    );
}
