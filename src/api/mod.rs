//! Backend boundary: response decoding and the plan backend trait
//!
//! Payloads from the backend are normalized into the canonical model here and
//! nowhere else; legacy field names are accepted by the model's serde
//! aliases. Transport is left to [`PlanBackend`] implementations.

pub mod error;

pub use error::{describe_error, ApiError, UserNotice};

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::model::PlanSnapshot;
use crate::store::{Action, ImageTarget, PlanStore};
use crate::Error;

/// The `{success, data}` wrapper every backend response uses
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// The payload of a successful envelope
    pub fn into_data(self) -> Result<T, ApiError> {
        if !self.success {
            let reason = self
                .error
                .or(self.detail)
                .unwrap_or_else(|| "request was not successful".to_string());
            return Err(ApiError::Backend(reason));
        }
        self.data
            .ok_or_else(|| ApiError::Backend("response carried no data".to_string()))
    }
}

/// Decode the body of `GET /business-plan`
pub fn decode_plan_response(body: &str) -> Result<PlanSnapshot, ApiError> {
    let envelope: ApiEnvelope<PlanSnapshot> = serde_json::from_str(body)?;
    envelope.into_data()
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(rename = "imageId", alias = "image_id")]
    image_id: String,
}

/// Decode the body of `POST /images/upload` into the new image id
///
/// Accepts the id bare or inside a `{success, data}` envelope.
pub fn decode_upload_response(body: &str) -> Result<String, ApiError> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Shape {
        Bare(UploadResponse),
        Wrapped(ApiEnvelope<UploadResponse>),
    }

    let upload = match serde_json::from_str::<Shape>(body)? {
        Shape::Bare(upload) => upload,
        Shape::Wrapped(envelope) => envelope.into_data()?,
    };
    if upload.image_id.trim().is_empty() {
        return Err(ApiError::Backend("upload returned an empty image id".to_string()));
    }
    Ok(upload.image_id)
}

/// Display URL of an uploaded image
pub fn image_url(api_base: &str, image_id: &str) -> String {
    format!("{}/images/{}", api_base.trim_end_matches('/'), image_id)
}

/// The remote side of the plan: snapshot fetch and image storage
pub trait PlanBackend {
    fn fetch_plan(&self) -> Result<PlanSnapshot, ApiError>;

    /// Store image bytes for `target`, returning the new image id
    fn upload_image(&self, target: &ImageTarget, bytes: &[u8]) -> Result<String, ApiError>;

    fn delete_image(&self, image_id: &str) -> Result<(), ApiError>;
}

/// A backend kept in a local directory
///
/// `business-plan.json` holds the response body of a plan fetch and images
/// live under `images/`, one file per id.
#[derive(Debug, Clone)]
pub struct DirBackend {
    pub root: PathBuf,
}

impl DirBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// File of an image id; ids must be a single plain file name inside `images/`
    fn image_path(&self, image_id: &str) -> Result<PathBuf, ApiError> {
        let mut parts = Path::new(image_id).components();
        let single = matches!((parts.next(), parts.next()), (Some(Component::Normal(_)), None));
        if !single || image_id.contains(['/', '\\']) {
            return Err(ApiError::Backend(format!("invalid image id '{}'", image_id)));
        }
        Ok(self.root.join("images").join(image_id))
    }
}

impl PlanBackend for DirBackend {
    fn fetch_plan(&self) -> Result<PlanSnapshot, ApiError> {
        let path = self.root.join("business-plan.json");
        let body = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ApiError::Http {
                status: 404,
                detail: Some("Business plan not found".to_string()),
            },
            _ => ApiError::Io(e),
        })?;
        decode_plan_response(&body)
    }

    fn upload_image(&self, target: &ImageTarget, bytes: &[u8]) -> Result<String, ApiError> {
        let image_id = uuid::Uuid::new_v4().to_string();
        fs::create_dir_all(self.root.join("images"))?;
        fs::write(self.image_path(&image_id)?, bytes)?;
        tracing::debug!(?target, image_id = %image_id, size = bytes.len(), "stored image");
        Ok(image_id)
    }

    fn delete_image(&self, image_id: &str) -> Result<(), ApiError> {
        fs::remove_file(self.image_path(image_id)?).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ApiError::Http {
                status: 404,
                detail: Some("Image not found".to_string()),
            },
            _ => ApiError::Io(e),
        })
    }
}

/// Fetch the plan and load it into the store
///
/// On any failure the store keeps its last-known-good snapshot.
pub fn refresh(store: &mut PlanStore, backend: &dyn PlanBackend) -> Result<Arc<PlanSnapshot>, Error> {
    let snapshot = match backend.fetch_plan() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!(error = %e, "plan fetch failed, keeping current snapshot");
            return Err(e.into());
        }
    };
    let loaded = store.dispatch(Action::load(snapshot)).map_err(|e| {
        tracing::warn!(error = %e, "fetched plan rejected, keeping current snapshot");
        e
    })?;
    tracing::info!(suppliers = loaded.suppliers.len(), "plan loaded from backend");
    Ok(loaded)
}

/// Upload an image and attach it to `target`
///
/// If the target was deleted while the upload ran, the attach is a no-op and
/// the uploaded image id is still returned.
pub fn complete_upload(
    store: &mut PlanStore,
    backend: &dyn PlanBackend,
    target: ImageTarget,
    bytes: &[u8],
) -> Result<String, Error> {
    let image_id = backend.upload_image(&target, bytes)?;
    store.dispatch(Action::AttachImage {
        target,
        image_ref: image_id.clone(),
    })?;
    Ok(image_id)
}

/// Delete the image attached to `target` and detach it
///
/// Returns false when the target has no image (or no longer exists).
pub fn complete_delete(
    store: &mut PlanStore,
    backend: &dyn PlanBackend,
    target: ImageTarget,
) -> Result<bool, Error> {
    let Some(image_id) = current_image(&store.get(), &target) else {
        return Ok(false);
    };
    backend.delete_image(&image_id)?;
    store.dispatch(Action::DetachImage { target })?;
    Ok(true)
}

fn current_image(snapshot: &PlanSnapshot, target: &ImageTarget) -> Option<String> {
    match target {
        ImageTarget::Actor { id } => snapshot.actor(*id)?.logo_ref.clone(),
        ImageTarget::Supplier { id } => snapshot.supplier(id)?.logo_ref.clone(),
        ImageTarget::Product { category, id } => {
            snapshot.products.find(*category, id)?.image_ref.clone()
        }
    }
}
