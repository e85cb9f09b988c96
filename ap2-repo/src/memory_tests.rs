//! In-memory store tests.

#[cfg(test)]
mod tests {
    use ap2_types::{
        AgentActionLog, AgentLogRepository, CatalogRepository, CredentialError,
        CredentialResolver, MandateId, WalletRepository,
    };

    use crate::InMemoryStore;
    use crate::security::TOKEN_PREFIX;
    use crate::seed;

    const EMAIL: &str = "bugsbunny@gmail.com";
    const VISA_ALIAS: &str = "Acme Bank Visa ending in 4242";

    fn setup_store() -> InMemoryStore {
        InMemoryStore::seeded()
    }

    #[tokio::test]
    async fn test_list_products() {
        let store = setup_store();

        let products = store.list_products().await.unwrap();

        assert_eq!(products.len(), 14);
        assert_eq!(products[0].id, "p1");
        assert_eq!(products[13].name, "Acme Anvil");
    }

    #[tokio::test]
    async fn test_find_product_by_name_ignores_case() {
        let store = setup_store();

        let product = store.find_product_by_name("red onion").await.unwrap();

        assert_eq!(product.unwrap().id, "p2");
        assert!(
            store
                .find_product_by_name("Blue Onion")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_match_product_by_containment() {
        let store = setup_store();

        let product = store.match_product("2x Coca Cola bottles").await.unwrap();
        assert_eq!(product.unwrap().id, "p10");

        assert!(store.match_product("Pepsi").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_payment_methods_for_known_and_unknown_accounts() {
        let store = setup_store();

        let methods = store.payment_methods(EMAIL).await.unwrap();
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].token, "tok_visa_4242");

        let none = store.payment_methods("nobody@example.com").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_shipping_address() {
        let store = setup_store();

        let address = store.shipping_address(EMAIL).await.unwrap().unwrap();
        assert_eq!(address.city, "Albuquerque");

        assert!(
            store
                .shipping_address("nobody@example.com")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_create_payment_token_records_issuance() {
        let store = setup_store();

        let token = store
            .create_payment_token(EMAIL, Some(VISA_ALIAS))
            .await
            .unwrap();

        assert!(token.starts_with(TOKEN_PREFIX));
        let record = store.token_record(&token).unwrap();
        assert_eq!(record.email_address, EMAIL);
        assert_eq!(record.payment_method_alias.as_deref(), Some(VISA_ALIAS));
        assert!(record.payment_mandate_id.is_none());
    }

    #[tokio::test]
    async fn test_stored_card_token_is_preregistered() {
        let store = setup_store();

        let method = store
            .resolve("tok_visa_4242", &MandateId::from("m1"))
            .await
            .unwrap();

        assert_eq!(method.alias, VISA_ALIAS);
        assert_eq!(method.brand(), Some("visa"));
    }

    #[tokio::test]
    async fn test_resolve_unknown_token_fails() {
        let store = setup_store();

        let result = store.resolve("tok_bogus", &MandateId::from("m1")).await;

        assert_eq!(result, Err(CredentialError::InvalidToken));
    }

    #[tokio::test]
    async fn test_resolve_falls_back_to_first_method() {
        let store = setup_store();
        let token = store
            .create_payment_token(EMAIL, Some("Some Other Card"))
            .await
            .unwrap();

        let method = store.resolve(&token, &MandateId::from("m2")).await.unwrap();

        assert_eq!(method.alias, VISA_ALIAS);
    }

    #[tokio::test]
    async fn test_resolve_records_mandate() {
        let store = setup_store();
        let token = store.create_payment_token(EMAIL, None).await.unwrap();

        store.resolve(&token, &MandateId::from("m3")).await.unwrap();

        let record = store.token_record(&token).unwrap();
        assert_eq!(record.payment_mandate_id, Some(MandateId::from("m3")));
    }

    #[tokio::test]
    async fn test_resolve_without_methods_fails() {
        let store = setup_store();
        let token = store
            .create_payment_token("nobody@example.com", None)
            .await
            .unwrap();

        let result = store.resolve(&token, &MandateId::from("m4")).await;

        assert_eq!(result, Err(CredentialError::NoPaymentMethod));
    }

    #[tokio::test]
    async fn test_custom_data() {
        let mut accounts = seed::accounts();
        accounts[0].payment_methods.clear();
        let store = InMemoryStore::with_data(vec![], accounts);

        assert!(store.list_products().await.unwrap().is_empty());
        assert!(store.token_record("tok_visa_4242").is_none());
    }

    #[tokio::test]
    async fn test_agent_log_append_and_list() {
        let store = setup_store();

        let first = AgentActionLog {
            action: "cart_created".into(),
            details: serde_json::Map::new(),
            timestamp: "2024-01-01T00:00:00Z".into(),
        };
        let mut second = first.clone();
        second.action = "payment_initiated".into();

        assert_eq!(store.append_log(first).await.unwrap(), 1);
        assert_eq!(store.append_log(second).await.unwrap(), 2);

        let logs = store.list_logs().await.unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].action, "cart_created");
        assert_eq!(logs[1].action, "payment_initiated");
    }
}
