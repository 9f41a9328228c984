// Test file - these are expected patterns in test code
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

//! Edge Case Tests for Webhook Processing
//!
//! Tests boundary conditions and races in:
//! - Signature gate (PAY-S01 to PAY-S03)
//! - Redelivery and concurrent delivery (PAY-D01 to PAY-D03)
//! - Row matching (PAY-M01 to PAY-M03)

#[cfg(test)]
mod signature_tests {
    use crate::signature::WebhookVerifier;

    // =========================================================================
    // PAY-S01: Every single-byte alteration of the payload is rejected
    // =========================================================================
    #[test]
    fn test_every_altered_byte_rejected() {
        let verifier = WebhookVerifier::new("sk_test_edge");
        let payload = br#"{"event":"charge.success","data":{"customer":{"email":"a@b.co"}}}"#;
        let signature = verifier.sign(payload).unwrap();

        for i in 0..payload.len() {
            let mut tampered = payload.to_vec();
            tampered[i] = tampered[i].wrapping_add(1);
            assert!(
                verifier.verify(&tampered, Some(&signature)).is_err(),
                "Altered byte {} should be rejected",
                i
            );
        }
    }

    // =========================================================================
    // PAY-S02: Whitespace-only difference in the body is a different payload
    // =========================================================================
    #[test]
    fn test_reformatted_json_rejected() {
        let verifier = WebhookVerifier::new("sk_test_edge");
        let signature = verifier.sign(br#"{"event":"charge.success"}"#).unwrap();

        assert!(verifier
            .verify(br#"{ "event": "charge.success" }"#, Some(&signature))
            .is_err());
    }

    // =========================================================================
    // PAY-S03: Signature header with surrounding whitespace is rejected
    // =========================================================================
    #[test]
    fn test_padded_signature_rejected() {
        let verifier = WebhookVerifier::new("sk_test_edge");
        let payload = b"{}";
        let signature = format!(" {} ", verifier.sign(payload).unwrap());

        assert!(verifier.verify(payload, Some(&signature)).is_err());
    }
}

#[cfg(test)]
mod delivery_tests {
    use std::sync::Arc;

    use paymark_sheets::{ColumnLayout, InMemoryStore};
    use tokio::sync::Barrier;

    use crate::signature::WebhookVerifier;
    use crate::webhooks::{WebhookHandler, WebhookOutcome, STATUS_PAID};

    const SECRET: &str = "sk_test_edge";

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn store() -> InMemoryStore {
        InMemoryStore::new(
            "Orders",
            vec![
                strings(&["Name", "Phone", "Email", "D", "E", "F", "G", "Status"]),
                strings(&["Ada", "", "ada@example.com", "", "", "", "", "Pending"]),
                strings(&["Bob", "", "bob@example.com", "", "", "", "", "Pending"]),
            ],
        )
    }

    fn signed_charge(email: &str) -> (Vec<u8>, String) {
        let payload = format!(
            r#"{{"event":"charge.success","data":{{"customer":{{"email":"{}"}}}}}}"#,
            email
        )
        .into_bytes();
        let signature = WebhookVerifier::new(SECRET).sign(&payload).unwrap();
        (payload, signature)
    }

    fn handler(store: &InMemoryStore) -> Arc<WebhookHandler> {
        Arc::new(WebhookHandler::new(
            WebhookVerifier::new(SECRET),
            Arc::new(store.clone()),
            ColumnLayout::default(),
        ))
    }

    // =========================================================================
    // PAY-D01: Identical event delivered twice - row stays Paid
    // =========================================================================
    #[tokio::test]
    async fn test_redelivery_is_idempotent() {
        let store = store();
        let handler = handler(&store);
        let (payload, signature) = signed_charge("ada@example.com");

        let first = handler.process(&payload, Some(&signature)).await;
        let second = handler.process(&payload, Some(&signature)).await;

        assert_eq!(first, WebhookOutcome::Updated { row: 2 });
        assert_eq!(second, WebhookOutcome::Updated { row: 2 });
        assert_eq!(store.row(2).await.unwrap()[7], STATUS_PAID);
        assert_eq!(store.row(3).await.unwrap()[7], "Pending");
    }

    // =========================================================================
    // PAY-D02: 10 concurrent deliveries of the same event - row ends Paid
    // =========================================================================
    #[tokio::test]
    async fn test_concurrent_duplicate_deliveries() {
        let store = store();
        let handler = handler(&store);
        let (payload, signature) = signed_charge("ada@example.com");
        let payload = Arc::new(payload);
        let signature = Arc::new(signature);

        let barrier = Arc::new(Barrier::new(10));
        let mut handles = vec![];

        for _ in 0..10 {
            let handler = Arc::clone(&handler);
            let barrier = Arc::clone(&barrier);
            let payload = Arc::clone(&payload);
            let signature = Arc::clone(&signature);

            handles.push(tokio::spawn(async move {
                barrier.wait().await;
                handler.process(&payload, Some(signature.as_str())).await
            }));
        }

        for handle in handles {
            let outcome = handle.await.unwrap();
            assert_eq!(outcome, WebhookOutcome::Updated { row: 2 });
        }

        assert_eq!(store.row(2).await.unwrap()[7], STATUS_PAID);
        assert!(store.saves().await.iter().all(|update| update.row == 2));
    }

    // =========================================================================
    // PAY-D03: Concurrent deliveries for different customers both land
    // =========================================================================
    #[tokio::test]
    async fn test_concurrent_different_customers() {
        let store = store();
        let handler = handler(&store);
        let (ada_payload, ada_signature) = signed_charge("ada@example.com");
        let (bob_payload, bob_signature) = signed_charge("bob@example.com");

        let (ada, bob) = tokio::join!(
            handler.process(&ada_payload, Some(&ada_signature)),
            handler.process(&bob_payload, Some(&bob_signature)),
        );

        assert_eq!(ada, WebhookOutcome::Updated { row: 2 });
        assert_eq!(bob, WebhookOutcome::Updated { row: 3 });
        assert_eq!(store.row(2).await.unwrap()[7], STATUS_PAID);
        assert_eq!(store.row(3).await.unwrap()[7], STATUS_PAID);
    }
}

#[cfg(test)]
mod matching_tests {
    use std::sync::Arc;

    use paymark_sheets::{ColumnLayout, InMemoryStore};

    use crate::signature::WebhookVerifier;
    use crate::webhooks::{WebhookHandler, WebhookOutcome};

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn handler(store: &InMemoryStore) -> WebhookHandler {
        WebhookHandler::new(
            WebhookVerifier::new("unused"),
            Arc::new(store.clone()),
            ColumnLayout::default(),
        )
    }

    // =========================================================================
    // PAY-M01: Header row is never matched, even if it holds the email
    // =========================================================================
    #[tokio::test]
    async fn test_header_row_not_matched() {
        let store = InMemoryStore::new(
            "Orders",
            vec![strings(&["", "", "ada@example.com", "", "", "", "", "Status"])],
        );

        let outcome = handler(&store).mark_paid("ada@example.com").await.unwrap();
        assert_eq!(outcome, WebhookOutcome::NoMatch);
    }

    // =========================================================================
    // PAY-M02: Already-paid row is rewritten as Paid, never reverted
    // =========================================================================
    #[tokio::test]
    async fn test_already_paid_row_stays_paid() {
        let store = InMemoryStore::new(
            "Orders",
            vec![
                strings(&["Name", "", "Email", "", "", "", "", "Status"]),
                strings(&["Ada", "", "ada@example.com", "", "", "", "", "Paid"]),
            ],
        );

        let outcome = handler(&store).mark_paid("ADA@example.com").await.unwrap();

        assert_eq!(outcome, WebhookOutcome::Updated { row: 2 });
        assert_eq!(store.row(2).await.unwrap()[7], "Paid");
    }

    // =========================================================================
    // PAY-M03: Email that only matches as a substring is not a match
    // =========================================================================
    #[tokio::test]
    async fn test_substring_email_not_matched() {
        let store = InMemoryStore::new(
            "Orders",
            vec![
                strings(&["Name", "", "Email"]),
                strings(&["Ada", "", "ada@example.com.ng"]),
                strings(&["Jada", "", "jada@example.com"]),
            ],
        );

        let outcome = handler(&store).mark_paid("ada@example.com").await.unwrap();

        assert_eq!(outcome, WebhookOutcome::NoMatch);
        assert!(store.saves().await.is_empty());
    }
}
