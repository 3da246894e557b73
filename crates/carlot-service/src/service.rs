use std::collections::BTreeSet;
use std::sync::Arc;

use carlot_gate::UploadGate;
use carlot_store::{BlobStore, RecordStore, StoreError};
use carlot_types::{Attachment, Car, CarForm, CarId, Price, TypeError};

use crate::error::{ServiceError, ServiceResult};

/// List, create, and delete car records.
///
/// Holds no state of its own beyond the injected store handles; every call
/// goes straight to the backends.
pub struct CarService {
    records: Arc<dyn RecordStore>,
    blobs: Arc<dyn BlobStore>,
    gate: UploadGate,
}

impl CarService {
    pub fn new(records: Arc<dyn RecordStore>, blobs: Arc<dyn BlobStore>, gate: UploadGate) -> Self {
        Self {
            records,
            blobs,
            gate,
        }
    }

    pub fn gate(&self) -> &UploadGate {
        &self.gate
    }

    /// Every record, in whatever order the store returns them.
    pub async fn list_cars(&self) -> ServiceResult<Vec<Car>> {
        self.records.list_all().await.map_err(|e| {
            tracing::error!("Failed to list cars: {e}");
            ServiceError::from(e)
        })
    }

    /// Validate, upload the image, and persist a new record.
    ///
    /// Field and attachment checks run before any storage call. If the upload
    /// succeeds but the record write fails, the uploaded object is left in
    /// place.
    pub async fn create_car(
        &self,
        form: CarForm,
        attachment: Option<Attachment>,
    ) -> ServiceResult<Car> {
        let name = required(form.name, "name")?;
        let category = required(form.category, "category")?;
        let raw_price = required(form.price, "price")?;
        let price = Price::parse(&raw_price).map_err(|e| {
            tracing::debug!("Rejected price {raw_price:?}: {e}");
            let reason = match e {
                TypeError::PriceOutOfRange(_) => "out of range",
                _ => "must be a number greater than 0",
            };
            ServiceError::Validation(format!("invalid price: {reason}"))
        })?;

        let attachment = self.gate.admit(attachment)?;
        let key = attachment.filename;

        let image_location = self
            .blobs
            .upload(&key, &attachment.content_type, attachment.bytes)
            .await
            .map_err(|e| {
                tracing::error!(key = %key, "Image upload failed: {e}");
                ServiceError::from(e)
            })?;

        let car = Car {
            id: CarId::generate(),
            name,
            category,
            price,
            image_location,
        };

        if let Err(e) = self.records.put(&car).await {
            tracing::warn!(
                key = %key,
                location = %car.image_location,
                "Record write failed after upload; image left orphaned: {e}"
            );
            return Err(e.into());
        }

        tracing::info!(id = %car.id, name = %car.name, "Created car");
        Ok(car)
    }

    /// Delete every id in `ids`. Duplicates collapse; an empty set never
    /// reaches the store.
    ///
    /// All deletions are attempted even after one fails. The first failure
    /// is returned once the loop finishes; deletions already applied stay
    /// applied. Returns the number of distinct ids processed.
    pub async fn delete_cars<I>(&self, ids: I) -> ServiceResult<usize>
    where
        I: IntoIterator<Item = CarId>,
    {
        let ids: BTreeSet<CarId> = ids.into_iter().collect();
        if ids.is_empty() {
            return Ok(0);
        }

        let mut first_error: Option<StoreError> = None;
        for id in &ids {
            if let Err(e) = self.records.delete(id).await {
                tracing::error!(id = %id, "Failed to delete car: {e}");
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e.into()),
            None => {
                tracing::info!(count = ids.len(), "Deleted cars");
                Ok(ids.len())
            }
        }
    }
}

impl std::fmt::Debug for CarService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarService")
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}

/// A present, non-blank field value, kept exactly as submitted.
fn required(value: Option<String>, field: &str) -> ServiceResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ServiceError::Validation(format!("missing field: {field}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use carlot_gate::{GateConfig, GateError};
    use carlot_store::{InMemoryBlobStore, InMemoryRecordStore};

    struct Fixture {
        records: Arc<InMemoryRecordStore>,
        blobs: Arc<InMemoryBlobStore>,
        service: CarService,
    }

    fn fixture() -> Fixture {
        let records = Arc::new(InMemoryRecordStore::new());
        let blobs = Arc::new(InMemoryBlobStore::with_base_url(
            "https://cars.s3.us-east-1.amazonaws.com",
        ));
        let service = CarService::new(
            records.clone(),
            blobs.clone(),
            UploadGate::with_default_stages(GateConfig::default()),
        );
        Fixture {
            records,
            blobs,
            service,
        }
    }

    fn civic_jpg() -> Attachment {
        Attachment::new("civic.jpg", "image/jpeg", Bytes::from_static(b"\xff\xd8\xff"))
    }

    fn assert_no_storage_calls(f: &Fixture) {
        assert_eq!(f.blobs.upload_count(), 0);
        assert_eq!(f.records.put_count(), 0);
    }

    // -----------------------------------------------------------------------
    // create_car
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn create_persists_one_record() {
        let f = fixture();
        let car = f
            .service
            .create_car(CarForm::new("Civic", "Sedan", "20000"), Some(civic_jpg()))
            .await
            .unwrap();

        assert_eq!(car.name, "Civic");
        assert_eq!(car.category, "Sedan");
        assert_eq!(car.price.value(), 20000.0);
        assert_eq!(
            car.image_location,
            "https://cars.s3.us-east-1.amazonaws.com/civic.jpg"
        );
        assert!(car.image_location.ends_with("civic.jpg"));
        assert_eq!(f.records.len(), 1);
        assert_eq!(f.records.get(&car.id), Some(car.clone()));
        assert_eq!(f.blobs.get("civic.jpg").unwrap(), Bytes::from_static(b"\xff\xd8\xff"));
        assert_eq!(f.blobs.content_type("civic.jpg").as_deref(), Some("image/jpeg"));
    }

    #[tokio::test]
    async fn create_then_list_round_trip() {
        let f = fixture();
        let created = f
            .service
            .create_car(CarForm::new("Civic", "Sedan", "20000"), Some(civic_jpg()))
            .await
            .unwrap();

        let listed = f.service.list_cars().await.unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn ids_are_fresh() {
        let f = fixture();
        let mut seen = BTreeSet::new();
        for i in 0..5 {
            let car = f
                .service
                .create_car(CarForm::new(format!("Car {i}"), "SUV", "1"), Some(civic_jpg()))
                .await
                .unwrap();
            assert!(seen.insert(car.id));
        }
        assert_eq!(f.records.len(), 5);
        // Same filename every time: one object, overwritten.
        assert_eq!(f.blobs.len(), 1);
    }

    #[tokio::test]
    async fn non_positive_price_touches_no_store() {
        for price in ["0", "-5", "-0.01"] {
            let f = fixture();
            let err = f
                .service
                .create_car(CarForm::new("Civic", "Sedan", price), Some(civic_jpg()))
                .await
                .unwrap_err();
            assert!(matches!(err, ServiceError::Validation(ref m) if m.contains("invalid price")));
            assert!(err.is_client_error());
            assert_no_storage_calls(&f);
        }
    }

    #[tokio::test]
    async fn non_numeric_price_rejected() {
        let f = fixture();
        let err = f
            .service
            .create_car(CarForm::new("Civic", "Sedan", "cheap"), Some(civic_jpg()))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_no_storage_calls(&f);
    }

    #[tokio::test]
    async fn unstorable_price_rejected_before_upload() {
        let f = fixture();
        let err = f
            .service
            .create_car(CarForm::new("Civic", "Sedan", "1e200"), Some(civic_jpg()))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m == "invalid price: out of range"));
        assert_no_storage_calls(&f);
    }

    #[tokio::test]
    async fn missing_field_checked_before_gate() {
        let cases = [
            (CarForm { name: None, ..CarForm::new("x", "Sedan", "1") }, "name"),
            (CarForm { category: Some("  ".into()), ..CarForm::new("Civic", "x", "1") }, "category"),
            (CarForm { price: Some(String::new()), ..CarForm::new("Civic", "Sedan", "x") }, "price"),
        ];
        for (form, field) in cases {
            let f = fixture();
            // No attachment either: a gate run would report MissingFile instead.
            let err = f.service.create_car(form, None).await.unwrap_err();
            match err {
                ServiceError::Validation(msg) => assert_eq!(msg, format!("missing field: {field}")),
                other => panic!("expected validation error, got {other:?}"),
            }
            assert_no_storage_calls(&f);
        }
    }

    #[tokio::test]
    async fn missing_attachment() {
        let f = fixture();
        let err = f
            .service
            .create_car(CarForm::new("Civic", "Sedan", "20000"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Rejected(GateError::MissingFile)));
        assert_no_storage_calls(&f);
    }

    #[tokio::test]
    async fn pdf_attachment_rejected_without_storage_calls() {
        let f = fixture();
        let pdf = Attachment::new("brochure.pdf", "application/pdf", Bytes::from_static(b"%PDF"));
        let err = f
            .service
            .create_car(CarForm::new("Civic", "Sedan", "20000"), Some(pdf))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Rejected(GateError::UnsupportedType { .. })));
        assert!(err.is_client_error());
        assert_no_storage_calls(&f);
    }

    #[tokio::test]
    async fn upload_failure_writes_no_record() {
        let f = fixture();
        f.blobs.set_unavailable(true);
        let err = f
            .service
            .create_car(CarForm::new("Civic", "Sedan", "20000"), Some(civic_jpg()))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Storage(StoreError::Unavailable { .. })));
        assert!(!err.is_client_error());
        assert_eq!(f.blobs.upload_count(), 1);
        assert_eq!(f.records.put_count(), 0);
    }

    #[tokio::test]
    async fn put_failure_leaves_orphaned_blob() {
        let f = fixture();
        f.records.set_unavailable(true);
        let err = f
            .service
            .create_car(CarForm::new("Civic", "Sedan", "20000"), Some(civic_jpg()))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Storage(_)));
        assert!(f.blobs.get("civic.jpg").is_some());
        assert!(f.records.is_empty());
    }

    // -----------------------------------------------------------------------
    // delete_cars / list_cars
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn empty_delete_is_noop() {
        let f = fixture();
        let n = f.service.delete_cars(Vec::<CarId>::new()).await.unwrap();
        assert_eq!(n, 0);
        assert_eq!(f.records.delete_count(), 0);
    }

    #[tokio::test]
    async fn delete_existing_and_absent() {
        let f = fixture();
        let car = f
            .service
            .create_car(CarForm::new("Civic", "Sedan", "20000"), Some(civic_jpg()))
            .await
            .unwrap();

        let n = f
            .service
            .delete_cars([car.id.clone(), CarId::from("does-not-exist")])
            .await
            .unwrap();
        assert_eq!(n, 2);
        assert_eq!(f.records.delete_count(), 2);

        let listed = f.service.list_cars().await.unwrap();
        assert!(listed.iter().all(|c| c.id != car.id));
    }

    #[tokio::test]
    async fn duplicate_ids_deleted_once() {
        let f = fixture();
        let id = CarId::from("a");
        f.service.delete_cars([id.clone(), id.clone(), id]).await.unwrap();
        assert_eq!(f.records.delete_count(), 1);
    }

    #[tokio::test]
    async fn delete_failure_attempts_every_id() {
        let f = fixture();
        f.records.set_unavailable(true);
        let err = f
            .service
            .delete_cars([CarId::from("a"), CarId::from("b"), CarId::from("c")])
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Storage(_)));
        assert_eq!(f.records.delete_count(), 3);
    }

    #[tokio::test]
    async fn failed_delete_keeps_earlier_and_later_deletions() {
        let f = fixture();
        for id in ["a", "b", "c"] {
            f.records
                .put(&Car {
                    id: CarId::from(id),
                    name: format!("Car {id}"),
                    category: "Sedan".into(),
                    price: Price::new(1.0).unwrap(),
                    image_location: format!("memory://carlot/{id}.jpg"),
                })
                .await
                .unwrap();
        }
        f.records.fail_deletes_of(CarId::from("b"));

        let err = f
            .service
            .delete_cars([CarId::from("a"), CarId::from("b"), CarId::from("c")])
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Storage(StoreError::Unavailable { .. })));
        assert_eq!(f.records.delete_count(), 3);

        let remaining: Vec<CarId> = f
            .service
            .list_cars()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(remaining, vec![CarId::from("b")]);
    }

    #[tokio::test]
    async fn list_failure_is_storage_error() {
        let f = fixture();
        f.records.set_unavailable(true);
        let err = f.service.list_cars().await.unwrap_err();
        assert!(matches!(err, ServiceError::Storage(_)));
    }
}
