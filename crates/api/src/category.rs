use crate::{error::Result, Client};
use hyper::Method;
use model::{Category, NewCategory};

const CATEGORIES: &str = "/api/categories";

impl Client {
    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        self.get(CATEGORIES).await
    }

    /// Creates a new category and returns it as stored by the server.
    pub async fn create_category(&self, name: &str, description: &str) -> Result<Category> {
        let bytes = self.send_json(Method::POST, CATEGORIES, &NewCategory { name, description }).await?;

        // Some deployments wrap the document as `{ "category": ... }`.
        use serde_json::Value;
        let mut value: Value = serde_json::from_slice(&bytes)?;
        let wrapped = value.get("category").is_some_and(Value::is_object);
        let doc = if wrapped { value["category"].take() } else { value };
        Ok(serde_json::from_value(doc)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::Client;
    use serde_json::json;
    use wiremock::{
        matchers::{body_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    #[tokio::test]
    async fn lists_categories() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "_id": "c1", "name": "Science" },
                { "_id": "c2", "name": "History", "description": "Old things" },
            ])))
            .mount(&server)
            .await;

        let client = Client::new(&server.uri(), None).unwrap();
        let categories = client.list_categories().await.unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[1].id, "c2");
        assert_eq!(categories[1].description, "Old things");
    }

    #[tokio::test]
    async fn creates_wrapped_category() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/categories"))
            .and(body_json(json!({ "name": "Math", "description": "" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "message": "Category created",
                "category": { "_id": "c9", "name": "Math" },
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::new(&server.uri(), None).unwrap();
        let category = client.create_category("Math", "").await.unwrap();
        assert_eq!(category.id, "c9");
        assert_eq!(category.name, "Math");
    }

    #[tokio::test]
    async fn surfaces_duplicate_category() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/categories"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({ "message": "Category already exists" })))
            .mount(&server)
            .await;

        let client = Client::new(&server.uri(), None).unwrap();
        let err = client.create_category("Math", "").await.unwrap_err();
        assert_eq!(err.status().map(|status| status.as_u16()), Some(409));
        assert_eq!(err.to_string(), "Category already exists");
    }
}
