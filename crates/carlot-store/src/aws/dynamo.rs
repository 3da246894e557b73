use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use carlot_types::{Car, CarId, Price};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::traits::RecordStore;

type Item = HashMap<String, AttributeValue>;

/// Attribute names of the car table.
///
/// The defaults match the table layout of the existing deployment: key
/// `MaXe`, then `TenXe`, `LoaiXe`, `GiaXe` (number) and `HinhDaiDien`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeNames {
    /// Partition key (string) holding the car id.
    pub key: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub image: String,
}

impl Default for AttributeNames {
    fn default() -> Self {
        Self {
            key: "MaXe".into(),
            name: "TenXe".into(),
            category: "LoaiXe".into(),
            price: "GiaXe".into(),
            image: "HinhDaiDien".into(),
        }
    }
}

impl AttributeNames {
    fn encode(&self, car: &Car) -> Item {
        HashMap::from([
            (self.key.clone(), AttributeValue::S(car.id.to_string())),
            (self.name.clone(), AttributeValue::S(car.name.clone())),
            (self.category.clone(), AttributeValue::S(car.category.clone())),
            (self.price.clone(), AttributeValue::N(car.price.to_string())),
            (self.image.clone(), AttributeValue::S(car.image_location.clone())),
        ])
    }

    fn decode(&self, item: &Item) -> StoreResult<Car> {
        let string = |attr: &str| -> StoreResult<String> {
            item.get(attr)
                .and_then(|v| v.as_s().ok())
                .cloned()
                .ok_or_else(|| {
                    StoreError::MalformedRecord(format!("missing string attribute '{attr}'"))
                })
        };

        let id = string(self.key.as_str())?;
        let raw_price = item
            .get(&self.price)
            .and_then(|v| v.as_n().ok())
            .ok_or_else(|| {
                StoreError::MalformedRecord(format!(
                    "record {id}: missing number attribute '{}'",
                    self.price
                ))
            })?;
        let price = Price::parse(raw_price)
            .map_err(|e| StoreError::MalformedRecord(format!("record {id}: {e}")))?;

        Ok(Car {
            id: CarId::from_string(id),
            name: string(self.name.as_str())?,
            category: string(self.category.as_str())?,
            price,
            image_location: string(self.image.as_str())?,
        })
    }
}

/// DynamoDB-backed record store. The table's partition key is a string
/// attribute named by [`AttributeNames::key`].
pub struct DynamoRecordStore {
    client: Client,
    table: String,
    attributes: AttributeNames,
}

impl DynamoRecordStore {
    pub fn new(sdk_config: &SdkConfig, table: impl Into<String>) -> Self {
        Self {
            client: Client::new(sdk_config),
            table: table.into(),
            attributes: AttributeNames::default(),
        }
    }

    pub fn with_attributes(mut self, attributes: AttributeNames) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn attributes(&self) -> &AttributeNames {
        &self.attributes
    }
}

#[async_trait]
impl RecordStore for DynamoRecordStore {
    async fn list_all(&self) -> StoreResult<Vec<Car>> {
        let mut cars = Vec::new();
        let mut start_key: Option<Item> = None;

        // A single Scan page stops at 1 MB; keep going until the table is exhausted.
        loop {
            let page = self
                .client
                .scan()
                .table_name(&self.table)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| StoreError::unavailable("dynamodb scan", DisplayErrorContext(&e)))?;

            for item in page.items() {
                cars.push(self.attributes.decode(item)?);
            }

            match page.last_evaluated_key() {
                Some(key) if !key.is_empty() => start_key = Some(key.clone()),
                _ => break,
            }
        }

        tracing::debug!(table = %self.table, count = cars.len(), "Scanned records");
        Ok(cars)
    }

    async fn put(&self, car: &Car) -> StoreResult<()> {
        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(self.attributes.encode(car)))
            .send()
            .await
            .map_err(|e| StoreError::unavailable("dynamodb put_item", DisplayErrorContext(&e)))?;
        Ok(())
    }

    async fn delete(&self, id: &CarId) -> StoreResult<()> {
        self.client
            .delete_item()
            .table_name(&self.table)
            .key(&self.attributes.key, AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| StoreError::unavailable("dynamodb delete_item", DisplayErrorContext(&e)))?;
        Ok(())
    }
}

impl std::fmt::Debug for DynamoRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamoRecordStore")
            .field("table", &self.table)
            .field("attributes", &self.attributes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn civic() -> Car {
        Car {
            id: CarId::from("3f1c"),
            name: "Civic".into(),
            category: "Sedan".into(),
            price: Price::new(20000.0).unwrap(),
            image_location: "https://b.s3.us-east-1.amazonaws.com/civic.jpg".into(),
        }
    }

    fn s(v: &str) -> AttributeValue {
        AttributeValue::S(v.into())
    }

    #[test]
    fn default_layout_matches_existing_table() {
        let item = AttributeNames::default().encode(&civic());
        assert_eq!(item["MaXe"], s("3f1c"));
        assert_eq!(item["TenXe"], s("Civic"));
        assert_eq!(item["LoaiXe"], s("Sedan"));
        assert_eq!(item["GiaXe"], AttributeValue::N("20000".into()));
        assert_eq!(item["HinhDaiDien"], s("https://b.s3.us-east-1.amazonaws.com/civic.jpg"));
        assert_eq!(item.len(), 5);
    }

    #[test]
    fn decodes_item_written_by_existing_deployment() {
        let item: Item = HashMap::from([
            ("MaXe".to_string(), s("9b2e")),
            ("TenXe".to_string(), s("Vios")),
            ("LoaiXe".to_string(), s("Sedan")),
            ("GiaXe".to_string(), AttributeValue::N("15000.5".into())),
            ("HinhDaiDien".to_string(), s("https://b.s3.amazonaws.com/vios.png")),
        ]);
        let car = AttributeNames::default().decode(&item).unwrap();
        assert_eq!(car.id, CarId::from("9b2e"));
        assert_eq!(car.name, "Vios");
        assert_eq!(car.price.value(), 15000.5);
        assert_eq!(car.image_location, "https://b.s3.amazonaws.com/vios.png");
    }

    #[test]
    fn custom_layout() {
        let attrs = AttributeNames {
            key: "id".into(),
            name: "name".into(),
            category: "category".into(),
            price: "price".into(),
            image: "imageLocation".into(),
        };
        let item = attrs.encode(&civic());
        assert_eq!(item["id"], s("3f1c"));
        assert_eq!(item["price"], AttributeValue::N("20000".into()));
        assert_eq!(attrs.decode(&item).unwrap(), civic());
        assert!(AttributeNames::default().decode(&item).is_err());
    }

    #[test]
    fn missing_attribute_is_malformed() {
        let attrs = AttributeNames::default();
        let mut item = attrs.encode(&civic());
        item.remove(&attrs.category);
        let err = attrs.decode(&item).unwrap_err();
        assert!(matches!(err, StoreError::MalformedRecord(ref m) if m.contains("LoaiXe")));
    }

    #[test]
    fn price_stored_as_string_is_malformed() {
        let attrs = AttributeNames::default();
        let mut item = attrs.encode(&civic());
        item.insert(attrs.price.clone(), s("20000"));
        assert!(matches!(
            attrs.decode(&item),
            Err(StoreError::MalformedRecord(_))
        ));
    }

    #[test]
    fn non_positive_stored_price_is_malformed() {
        let attrs = AttributeNames::default();
        let mut item = attrs.encode(&civic());
        item.insert(attrs.price.clone(), AttributeValue::N("0".into()));
        assert!(attrs.decode(&item).is_err());
    }

    #[test]
    fn layout_from_toml_keeps_defaults_for_unset_names() {
        let attrs: AttributeNames = toml::from_str(r#"key = "id""#).unwrap();
        assert_eq!(attrs.key, "id");
        assert_eq!(attrs.name, "TenXe");
    }
}
