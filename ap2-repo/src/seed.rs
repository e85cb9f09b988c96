//! Static demo data: the merchant catalog and the account database.

use ap2_types::{
    CardNetwork, DEFAULT_USER_EMAIL, PaymentMethod, PaymentMethodType, Product, ShippingAddress,
};
use rust_decimal_macros::dec;

/// A wallet account: where to ship and how to pay.
#[derive(Debug, Clone)]
pub struct Account {
    pub email: String,
    pub shipping_address: ShippingAddress,
    pub payment_methods: Vec<PaymentMethod>,
}

/// The merchant catalog, in listing order.
pub fn products() -> Vec<Product> {
    vec![
        Product::new("p1", "Fresh Tomato Hybrid", dec!(38.00), "Fresh hybrid tomatoes", "500g"),
        Product::new("p2", "Red Onion", dec!(45.00), "Fresh red onions", "1kg"),
        Product::new("p3", "Potato (New Crop)", dec!(32.00), "Fresh potatoes", "1kg"),
        Product::new("p4", "Amul Taaza Milk", dec!(27.00), "Fresh milk", "500ml"),
        Product::new("p5", "Organic Carrots", dec!(45.00), "Fresh carrots", "500g"),
        Product::new("p6", "Brown Bread", dec!(50.00), "Whole wheat bread", "400g"),
        Product::new("p7", "Salted Butter", dec!(58.00), "Pure butter", "100g"),
        Product::new("p8", "Lays India's Magic Masala", dec!(20.00), "Flavored chips", "50g"),
        Product::new("p9", "Doritos Cheese", dec!(50.00), "Cheese flavored chips", "100g"),
        Product::new("p10", "Coca Cola", dec!(40.00), "Cold beverage", "750ml"),
        Product::new("p11", "Real Mixed Fruit Juice", dec!(110.00), "Mixed fruit juice", "1L"),
        Product::new("p12", "Maggi 2-Minute Noodles", dec!(14.00), "Quick noodles", "70g"),
        Product::new("p13", "Kissan Ketchup", dec!(120.00), "Tomato ketchup", "900g"),
        Product::new("p14", "Acme Anvil", dec!(50.00), "Heavy duty", "N/A"),
    ]
}

/// The account database. Every stored card carries a token of its own.
pub fn accounts() -> Vec<Account> {
    vec![Account {
        email: DEFAULT_USER_EMAIL.to_string(),
        shipping_address: ShippingAddress {
            recipient: "Bugs Bunny".into(),
            organization: "Warner Bros".into(),
            address_line: vec!["123 Carrot Lane".into()],
            city: "Albuquerque".into(),
            region: "NM".into(),
            postal_code: "87101".into(),
            country: "US".into(),
            phone_number: "+1-555-010-1010".into(),
        },
        payment_methods: vec![PaymentMethod {
            method_type: PaymentMethodType::Card,
            alias: "Acme Bank Visa ending in 4242".into(),
            network: vec![CardNetwork {
                name: "visa".into(),
                formats: vec!["DPAN".into()],
            }],
            cryptogram: "crypt_abc123".into(),
            token: "tok_visa_4242".into(),
            card_holder_name: "Bugs Bunny".into(),
        }],
    }]
}
