//! Application service unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    use ap2_repo::{FixedCode, InMemoryStore, RandomDigits};
    use ap2_types::{
        AgentActionLog, AppError, CardNetwork, CartItemRequest, CreateCartRequest,
        CredentialError, CredentialResolver, DEFAULT_CURRENCY, MandateId, PaymentError,
        PaymentMandate, PaymentMethod, PaymentMethodType, PaymentOutcome, PaymentStatus,
        TokenizeRequest, ValidateProductRequest,
    };

    use crate::service::{CHALLENGE_MESSAGE, MERCHANT_ID};
    use crate::{MerchantService, PaymentChallengeCoordinator, WalletService};

    /// Resolver over a fixed token table, recording every lookup.
    pub struct MockResolver {
        methods: HashMap<String, PaymentMethod>,
        lookups: Mutex<Vec<(String, MandateId)>>,
    }

    impl MockResolver {
        pub fn new() -> Self {
            let mut methods = HashMap::new();
            methods.insert("tok_visa_4242".to_string(), card("visa"));
            methods.insert("tok_plain".to_string(), PaymentMethod {
                network: Vec::new(),
                ..card("unused")
            });
            Self {
                methods,
                lookups: Mutex::new(Vec::new()),
            }
        }

        pub fn lookups(&self) -> usize {
            self.lookups.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CredentialResolver for MockResolver {
        async fn resolve(
            &self,
            token: &str,
            mandate_id: &MandateId,
        ) -> Result<PaymentMethod, CredentialError> {
            self.lookups
                .lock()
                .unwrap()
                .push((token.to_string(), mandate_id.clone()));
            self.methods
                .get(token)
                .cloned()
                .ok_or(CredentialError::InvalidToken)
        }
    }

    fn card(network: &str) -> PaymentMethod {
        PaymentMethod {
            method_type: PaymentMethodType::Card,
            alias: "Acme Bank Visa ending in 4242".into(),
            network: vec![CardNetwork {
                name: network.into(),
                formats: vec!["DPAN".into()],
            }],
            cryptogram: "crypt_abc123".into(),
            token: "tok_visa_4242".into(),
            card_holder_name: "Bugs Bunny".into(),
        }
    }

    fn mandate(id: &str, token: &str) -> PaymentMandate {
        PaymentMandate {
            mandate_id: MandateId::from(id),
            cart_id: "cart_1".into(),
            amount: dec!(110.00),
            currency: DEFAULT_CURRENCY.into(),
            payment_token: token.into(),
            user_signature: "sig_user".into(),
        }
    }

    fn coordinator() -> PaymentChallengeCoordinator<MockResolver> {
        PaymentChallengeCoordinator::new(Arc::new(MockResolver::new()))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Payment challenge
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_no_code_issues_single_challenge() {
        let coord = coordinator();
        let m = mandate("m1", "tok_visa_4242");

        let outcome = coord.initiate_payment(&m, None).await.unwrap();

        match outcome {
            PaymentOutcome::ChallengeRequired {
                message,
                display_text,
            } => {
                assert_eq!(message, CHALLENGE_MESSAGE);
                assert!(display_text.contains("123456"));
            }
            other => panic!("expected challenge, got {:?}", other),
        }
        assert!(coord.is_pending(&m.mandate_id));
        assert_eq!(coord.pending_count(), 1);
    }

    #[tokio::test]
    async fn test_repeated_challenge_keeps_one_entry() {
        let coord = coordinator();
        let m = mandate("m1", "tok_visa_4242");

        coord.initiate_payment(&m, None).await.unwrap();
        coord.initiate_payment(&m, None).await.unwrap();

        assert_eq!(coord.pending_count(), 1);
    }

    #[tokio::test]
    async fn test_correct_code_settles_and_clears_pending() {
        let coord = coordinator();
        let m = mandate("m1", "tok_visa_4242");

        coord.initiate_payment(&m, None).await.unwrap();
        let outcome = coord.initiate_payment(&m, Some("123456")).await.unwrap();

        assert_eq!(outcome.status(), PaymentStatus::Success);
        let receipt = outcome.receipt().unwrap();
        assert_eq!(receipt.amount, m.amount);
        assert_eq!(receipt.card_brand, "visa");
        assert_eq!(receipt.merchant, "Merchant Agent 01");
        assert!(receipt.id.starts_with("rcpt_"));
        assert!(!coord.is_pending(&m.mandate_id));
    }

    #[tokio::test]
    async fn test_code_accepted_only_once() {
        let coord = coordinator();
        let m = mandate("m1", "tok_visa_4242");

        coord.initiate_payment(&m, None).await.unwrap();
        coord.initiate_payment(&m, Some("123456")).await.unwrap();
        let replay = coord.initiate_payment(&m, Some("123456")).await;

        assert_eq!(replay, Err(PaymentError::IncorrectCode));
    }

    #[tokio::test]
    async fn test_wrong_code_keeps_challenge_open() {
        let coord = coordinator();
        let m = mandate("m1", "tok_visa_4242");

        coord.initiate_payment(&m, None).await.unwrap();
        let wrong = coord.initiate_payment(&m, Some("000000")).await;

        assert_eq!(wrong, Err(PaymentError::IncorrectCode));
        assert!(coord.is_pending(&m.mandate_id));

        let outcome = coord.initiate_payment(&m, Some("123456")).await.unwrap();
        assert_eq!(outcome.status(), PaymentStatus::Success);
    }

    #[tokio::test]
    async fn test_code_without_challenge_is_rejected() {
        let coord = coordinator();
        let m = mandate("m1", "tok_visa_4242");

        let result = coord.initiate_payment(&m, Some("123456")).await;

        assert_eq!(result, Err(PaymentError::IncorrectCode));
        assert_eq!(coord.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_code_counts_as_absent() {
        let coord = coordinator();
        let m = mandate("m1", "tok_visa_4242");

        let outcome = coord.initiate_payment(&m, Some("")).await.unwrap();

        assert_eq!(outcome.status(), PaymentStatus::ChallengeRequired);
        assert!(coord.is_pending(&m.mandate_id));
    }

    #[tokio::test]
    async fn test_unknown_token_fails_without_challenge() {
        let coord = coordinator();
        let m = mandate("m1", "tok_bogus");

        let result = coord.initiate_payment(&m, None).await;

        assert_eq!(
            result,
            Err(PaymentError::Credential(CredentialError::InvalidToken))
        );
        assert!(!coord.is_pending(&m.mandate_id));
    }

    #[tokio::test]
    async fn test_token_checked_before_code() {
        let coord = coordinator();
        coord
            .initiate_payment(&mandate("m1", "tok_visa_4242"), None)
            .await
            .unwrap();

        // Same mandate id, but the token no longer resolves
        let result = coord
            .initiate_payment(&mandate("m1", "tok_bogus"), Some("123456"))
            .await;

        assert!(matches!(result, Err(PaymentError::Credential(_))));
        assert!(coord.is_pending(&MandateId::from("m1")));
    }

    #[tokio::test]
    async fn test_challenges_are_per_mandate() {
        let coord = coordinator();
        let a = mandate("m1", "tok_visa_4242");
        let b = mandate("m2", "tok_visa_4242");

        coord.initiate_payment(&a, None).await.unwrap();
        assert_eq!(
            coord.initiate_payment(&b, Some("123456")).await,
            Err(PaymentError::IncorrectCode)
        );
        assert!(coord.is_pending(&a.mandate_id));
    }

    #[tokio::test]
    async fn test_missing_network_gives_unknown_brand() {
        let coord = coordinator();
        let m = mandate("m1", "tok_plain");

        coord.initiate_payment(&m, None).await.unwrap();
        let outcome = coord.initiate_payment(&m, Some("123456")).await.unwrap();

        assert_eq!(outcome.receipt().unwrap().card_brand, "unknown");
    }

    #[tokio::test]
    async fn test_resolver_called_with_mandate_id() {
        let resolver = Arc::new(MockResolver::new());
        let coord = PaymentChallengeCoordinator::new(resolver.clone());

        coord
            .initiate_payment(&mandate("m1", "tok_visa_4242"), None)
            .await
            .unwrap();

        assert_eq!(resolver.lookups(), 1);
        let lookups = resolver.lookups.lock().unwrap();
        assert_eq!(lookups[0].1, MandateId::from("m1"));
    }

    #[tokio::test]
    async fn test_custom_fixed_code() {
        let coord = PaymentChallengeCoordinator::with_code_generator(
            Arc::new(MockResolver::new()),
            FixedCode::new("424242"),
        );
        let m = mandate("m1", "tok_visa_4242");

        coord.initiate_payment(&m, None).await.unwrap();
        assert_eq!(
            coord.initiate_payment(&m, Some("123456")).await,
            Err(PaymentError::IncorrectCode)
        );
        assert!(coord.initiate_payment(&m, Some("424242")).await.is_ok());
    }

    #[tokio::test]
    async fn test_random_code_round_trip() {
        let coord = PaymentChallengeCoordinator::with_code_generator(
            Arc::new(MockResolver::new()),
            RandomDigits::default(),
        );
        let m = mandate("m1", "tok_visa_4242");

        let PaymentOutcome::ChallengeRequired { display_text, .. } =
            coord.initiate_payment(&m, None).await.unwrap()
        else {
            panic!("expected challenge");
        };
        let code = display_text
            .trim_end_matches(')')
            .rsplit(' ')
            .next()
            .unwrap()
            .to_string();
        assert_eq!(code.len(), 6);

        let outcome = coord.initiate_payment(&m, Some(&code)).await.unwrap();
        assert_eq!(outcome.status(), PaymentStatus::Success);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_redemptions_settle_once() {
        let coord = Arc::new(coordinator());
        let m = mandate("m1", "tok_visa_4242");
        coord.initiate_payment(&m, None).await.unwrap();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let coord = coord.clone();
                let m = m.clone();
                tokio::spawn(async move { coord.initiate_payment(&m, Some("123456")).await })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(coord.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_end_to_end_with_store() {
        let store = Arc::new(InMemoryStore::seeded());
        let wallet = WalletService::new(store.clone());
        let coord = PaymentChallengeCoordinator::new(store.clone());

        let token = wallet
            .tokenize(TokenizeRequest {
                email: "bugsbunny@gmail.com".into(),
                alias: None,
            })
            .await
            .unwrap()
            .token;
        let m = mandate("m_store", &token);

        coord.initiate_payment(&m, None).await.unwrap();
        let outcome = coord.initiate_payment(&m, Some("123456")).await.unwrap();

        assert_eq!(outcome.receipt().unwrap().card_brand, "visa");
        let record = store.token_record(&token).unwrap();
        assert_eq!(record.payment_mandate_id, Some(MandateId::from("m_store")));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Merchant
    // ─────────────────────────────────────────────────────────────────────────

    fn merchant() -> MerchantService<InMemoryStore> {
        MerchantService::new(Arc::new(InMemoryStore::seeded()))
    }

    fn cart_request(items: &[(&str, u32)]) -> CreateCartRequest {
        CreateCartRequest {
            items: items
                .iter()
                .map(|(name, quantity)| CartItemRequest {
                    name: name.to_string(),
                    quantity: *quantity,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_list_products() {
        let products = merchant().list_products().await.unwrap();
        assert_eq!(products.total, 14);
        assert_eq!(products.products[0].id, "p1");
    }

    #[tokio::test]
    async fn test_validate_product_ignores_case() {
        let found = merchant()
            .validate_product(ValidateProductRequest {
                product_name: "coca cola".into(),
            })
            .await
            .unwrap();
        assert!(found.exists);
        assert_eq!(found.product_id.as_deref(), Some("p10"));

        let missing = merchant()
            .validate_product(ValidateProductRequest {
                product_name: "Coca".into(),
            })
            .await
            .unwrap();
        assert!(!missing.exists);
    }

    #[tokio::test]
    async fn test_create_cart_totals_and_skips_unknown() {
        let cart = merchant()
            .create_cart(
                "trusted_shopping_agent",
                cart_request(&[
                    ("Coca Cola 750ml", 2),
                    ("Unobtainium", 3),
                    ("Maggi 2-Minute Noodles", 1),
                ]),
            )
            .await
            .unwrap();

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0].product_id, "p10");
        assert_eq!(cart.total_price, dec!(94.00));
        assert_eq!(cart.merchant_id, MERCHANT_ID);
        assert!(cart.cart_id.starts_with("cart_"));
        assert!(cart.merchant_signature.starts_with("sig_merch_"));
    }

    #[tokio::test]
    async fn test_create_cart_rejects_unknown_agent() {
        let result = merchant()
            .create_cart("rogue_agent", cart_request(&[("Coca Cola", 1)]))
            .await;

        assert!(matches!(
            result,
            Err(AppError::Forbidden(ref msg)) if msg == "Unauthorized Shopping Agent: rogue_agent"
        ));
    }

    #[tokio::test]
    async fn test_configured_known_agents() {
        let merchant = merchant().with_known_agents(vec!["kiosk".into()]);

        assert!(merchant.is_known_agent("kiosk"));
        assert!(!merchant.is_known_agent("demo_frontend"));
    }

    #[tokio::test]
    async fn test_agent_log_append_and_list() {
        let merchant = merchant();
        let entry = AgentActionLog {
            action: "cart_created".into(),
            details: serde_json::Map::new(),
            timestamp: "2024-01-01T00:00:00Z".into(),
        };

        let first = merchant.log_agent_action(entry.clone()).await.unwrap();
        let second = merchant.log_agent_action(entry).await.unwrap();
        assert_eq!(first.total_logs, 1);
        assert_eq!(second.total_logs, 2);
        assert_eq!(second.status, "logged");

        let logs = merchant.agent_logs().await.unwrap();
        assert_eq!(logs.total, 2);
        assert_eq!(logs.logs[0].action, "cart_created");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Wallet
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_wallet_unknown_account() {
        let wallet = WalletService::new(Arc::new(InMemoryStore::seeded()));

        assert!(wallet.payment_methods("nobody@example.com").await.unwrap().is_empty());
        assert!(matches!(
            wallet.shipping_address("nobody@example.com").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_tokenize_rejects_blank_email() {
        let wallet = WalletService::new(Arc::new(InMemoryStore::seeded()));

        let result = wallet
            .tokenize(TokenizeRequest {
                email: "  ".into(),
                alias: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
