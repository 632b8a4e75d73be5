use reqwest::Client;
use serde_json::{json, Value};

use super::spawn_server;

fn book_payload(name: &str, page_count: i64, read_page: i64, reading: bool) -> Value {
    json!({
        "name": name,
        "year": 2010,
        "author": "John Doe",
        "summary": "Lorem ipsum dolor sit amet",
        "publisher": "Dicoding Indonesia",
        "pageCount": page_count,
        "readPage": read_page,
        "reading": reading
    })
}

async fn create_book(client: &Client, base: &str, payload: &Value) -> String {
    let response = client
        .post(format!("{}/books", base))
        .json(payload)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["data"]["bookId"]
        .as_str()
        .expect("No book ID")
        .to_string()
}

#[tokio::test]
async fn test_health_check() {
    let base = spawn_server().await;
    let response = Client::new()
        .get(format!("{}/health", base))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["books"], 0);
}

#[tokio::test]
async fn test_create_and_get_book() {
    let base = spawn_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/books", base))
        .json(&book_payload("Gula", 100, 100, false))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Buku berhasil ditambahkan");
    let id = body["data"]["bookId"].as_str().expect("No book ID");
    assert_eq!(id.len(), 16);

    let response = client
        .get(format!("{}/books/{}", base, id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "success");
    let book = &body["data"]["book"];
    assert_eq!(book["id"], id);
    assert_eq!(book["name"], "Gula");
    assert_eq!(book["year"], 2010);
    assert_eq!(book["pageCount"], 100);
    assert_eq!(book["readPage"], 100);
    assert_eq!(book["finished"], true);
    assert_eq!(book["reading"], false);
    assert_eq!(book["insertedAt"], book["updatedAt"]);
}

#[tokio::test]
async fn test_create_without_name() {
    let base = spawn_server().await;
    let client = Client::new();

    let mut payload = book_payload("", 10, 0, false);
    let response = client
        .post(format!("{}/books", base))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Gagal menambahkan buku. Mohon isi nama buku");

    payload.as_object_mut().unwrap().remove("name");
    let response = client
        .post(format!("{}/books", base))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_create_with_read_page_over_page_count() {
    let base = spawn_server().await;
    let response = Client::new()
        .post(format!("{}/books", base))
        .json(&book_payload("X", 10, 20, false))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "fail");
    assert_eq!(
        body["message"],
        "Gagal menambahkan buku. readPage tidak boleh lebih besar dari pageCount"
    );
}

#[tokio::test]
async fn test_malformed_body_gets_envelope() {
    let base = spawn_server().await;
    let response = Client::new()
        .post(format!("{}/books", base))
        .json(&json!({"name": "X", "pageCount": "many"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "fail");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_get_unknown_book() {
    let base = spawn_server().await;
    let response = Client::new()
        .get(format!("{}/books/xxxxx", base))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Buku tidak ditemukan");
}

#[tokio::test]
async fn test_list_books_with_filters() {
    let base = spawn_server().await;
    let client = Client::new();

    let first = create_book(&client, &base, &book_payload("Kancil Cerdik", 10, 2, true)).await;
    let second = create_book(&client, &base, &book_payload("Si KANCIL", 10, 10, false)).await;
    let third = create_book(&client, &base, &book_payload("Laskar Pelangi", 10, 10, true)).await;

    let list = |query: &'static str| {
        let client = client.clone();
        let url = format!("{}/books{}", base, query);
        async move {
            let response = client.get(url).send().await.expect("Failed to send request");
            assert_eq!(response.status(), 200);
            let body: Value = response.json().await.expect("Failed to parse response");
            assert_eq!(body["status"], "success");
            body["data"]["books"]
                .as_array()
                .expect("No books array")
                .iter()
                .map(|b| b["id"].as_str().unwrap().to_string())
                .collect::<Vec<_>>()
        }
    };

    assert_eq!(list("").await, vec![first.clone(), second.clone(), third.clone()]);
    assert_eq!(list("?name=kancil").await, vec![first.clone(), second.clone()]);
    assert_eq!(list("?reading=1").await, vec![first.clone(), third.clone()]);
    assert_eq!(list("?reading=0").await, vec![second.clone()]);
    assert_eq!(list("?finished=1").await, vec![second.clone(), third.clone()]);
    assert_eq!(list("?finished=0&name=KANCIL").await, vec![first.clone()]);
    assert_eq!(list("?name=").await.len(), 3);

    // Projection only exposes id, name and publisher
    let body: Value = client
        .get(format!("{}/books", base))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let entry = body["data"]["books"][0].as_object().expect("No book entry");
    assert_eq!(entry.len(), 3);
    assert_eq!(entry["publisher"], "Dicoding Indonesia");
}

#[tokio::test]
async fn test_update_book() {
    let base = spawn_server().await;
    let client = Client::new();
    let id = create_book(&client, &base, &book_payload("A", 100, 10, true)).await;

    let before: Value = client
        .get(format!("{}/books/{}", base, id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let response = client
        .put(format!("{}/books/{}", base, id))
        .json(&book_payload("Y", 5, 5, false))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Buku berhasil diperbarui");

    let after: Value = client
        .get(format!("{}/books/{}", base, id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let (before, after) = (&before["data"]["book"], &after["data"]["book"]);
    assert_eq!(after["id"], before["id"]);
    assert_eq!(after["name"], "Y");
    assert_eq!(after["readPage"], 5);
    assert_eq!(after["reading"], false);
    assert_eq!(after["finished"], false);
    assert_eq!(after["insertedAt"], before["insertedAt"]);
    assert!(after["updatedAt"].as_str().unwrap() >= before["updatedAt"].as_str().unwrap());
}

#[tokio::test]
async fn test_update_failures() {
    let base = spawn_server().await;
    let client = Client::new();
    let id = create_book(&client, &base, &book_payload("A", 100, 10, false)).await;

    let cases = [
        (
            format!("{}/books/{}", base, id),
            book_payload("", 10, 1, false),
            400,
            "Gagal memperbarui buku. Mohon isi nama buku",
        ),
        (
            format!("{}/books/{}", base, id),
            book_payload("B", 10, 11, false),
            400,
            "Gagal memperbarui buku. readPage tidak boleh lebih besar dari pageCount",
        ),
        (
            format!("{}/books/xxxxx", base),
            book_payload("", 10, 1, false),
            400,
            "Gagal memperbarui buku. Mohon isi nama buku",
        ),
        (
            format!("{}/books/xxxxx", base),
            book_payload("B", 10, 1, false),
            404,
            "Gagal memperbarui buku. Id tidak ditemukan",
        ),
    ];

    for (url, payload, status, message) in cases {
        let response = client
            .put(url)
            .json(&payload)
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), status);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["status"], "fail");
        assert_eq!(body["message"], message);
    }
}

#[tokio::test]
async fn test_delete_book() {
    let base = spawn_server().await;
    let client = Client::new();
    let id = create_book(&client, &base, &book_payload("A", 10, 1, false)).await;

    let response = client
        .delete(format!("{}/books/{}", base, id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Buku berhasil dihapus");

    let response = client
        .get(format!("{}/books/{}", base, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    let response = client
        .delete(format!("{}/books/{}", base, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Buku gagal dihapus. Id tidak ditemukan");
}

#[tokio::test]
async fn test_list_books_with_repeated_query_keys() {
    let base = spawn_server().await;
    let client = Client::new();
    let id = create_book(&client, &base, &book_payload("Kancil", 10, 10, true)).await;

    let response = client
        .get(format!("{}/books?reading=1&reading=0", base))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["books"], json!([]));

    let response = client
        .get(format!("{}/books?name=kancil&name=pelangi", base))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["books"][0]["id"], id.as_str());
}

#[tokio::test]
async fn test_body_without_json_content_type() {
    let base = spawn_server().await;
    let response = Client::new()
        .post(format!("{}/books", base))
        .body(book_payload("Gula", 100, 100, false).to_string())
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 415);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "fail");
    assert!(body["message"].is_string());
}
