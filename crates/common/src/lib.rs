pub mod observability;
pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health::healthy("order-service");
        assert_eq!(h.status, "healthy");
        assert_eq!(h.service, "order-service");
    }

    #[test]
    fn error_body_shape() {
        let body = types::ErrorBody { error: "Order not found".into() };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v, serde_json::json!({"error": "Order not found"}));
    }
}
