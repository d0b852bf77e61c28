//! The output step of an object-detection processor.
//!
//! Given the inbound message and the detections the model produced for it,
//! builds the outbound message: optionally annotates the image, then places
//! the detection result either in the payload or under a named header.
//!
//! ```text
//! inbound image ──► model (external) ──► detections
//!       │                                    │
//!       └──► annotate (if enabled) ◄─────────┘
//!                   │
//!                   ▼
//!      outbound message (payload + headers)
//! ```

use std::borrow::Cow;
use std::collections::BTreeMap;

use tracing::{debug, error};

use crate::annotate::{Annotator, FailurePolicy};
use crate::detection::{io_json, Detection};
use crate::error::BoxlabelError;

/// A message moving through the pipeline: raw payload bytes plus string
/// headers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Message {
    pub payload: Vec<u8>,
    pub headers: BTreeMap<String, String>,
}

impl Message {
    /// Creates a message with the given payload and no headers.
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: payload.into(),
            headers: BTreeMap::new(),
        }
    }

    /// Adds a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// How the output step is wired.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StageConfig {
    /// Draw the detections onto the inbound image.
    pub draw_bounding_box: bool,

    /// Header to store the JSON result under. When set, the payload carries
    /// the (possibly annotated) image; when unset, the payload carries the
    /// JSON result and the image is dropped.
    pub result_header: Option<String>,

    /// What to do if the image can't be annotated.
    pub failure_policy: FailurePolicy,
}

/// Builds outbound messages from inbound ones and their detections.
#[derive(Clone, Debug)]
pub struct DetectionStage<'f> {
    config: StageConfig,
    annotator: Annotator<'f>,
}

impl DetectionStage<'static> {
    /// Creates a stage that annotates with the embedded caption font.
    pub fn new(config: StageConfig) -> Result<Self, BoxlabelError> {
        Ok(Self::with_annotator(config, Annotator::new()?))
    }
}

impl<'f> DetectionStage<'f> {
    pub fn with_annotator(config: StageConfig, annotator: Annotator<'f>) -> Self {
        Self { config, annotator }
    }

    /// The wiring this stage was built with.
    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// Builds the outbound message for `input` from typed detections. The
    /// result is written in typed JSON form.
    ///
    /// Inbound headers are always passed through.
    ///
    /// # Errors
    /// Fails if the result can't be serialized, or if annotation fails under
    /// [`FailurePolicy::Strict`].
    pub fn build_output(
        &self,
        input: &Message,
        detections: &[Detection],
    ) -> Result<Message, BoxlabelError> {
        let result_json = io_json::to_json_string(detections)?;
        self.route(input, result_json, || Ok(Cow::Borrowed(detections)))
    }

    /// Builds the outbound message for `input` from the model's JSON result,
    /// which is forwarded byte for byte so downstream consumers see the same
    /// wire format. The result is only parsed when it has to be drawn.
    ///
    /// # Errors
    /// Fails under [`FailurePolicy::Strict`] if the result must be drawn but
    /// doesn't parse, or if annotation fails.
    pub fn build_output_from_json(
        &self,
        input: &Message,
        result_json: &str,
    ) -> Result<Message, BoxlabelError> {
        self.route(input, result_json.to_owned(), || {
            io_json::from_json_str(result_json).map(Cow::Owned)
        })
    }

    fn route<'d>(
        &self,
        input: &Message,
        result_json: String,
        detections: impl FnOnce() -> Result<Cow<'d, [Detection]>, BoxlabelError>,
    ) -> Result<Message, BoxlabelError> {
        let mut headers = input.headers.clone();
        let result_bytes = result_json.len();

        let payload = match &self.config.result_header {
            Some(header) => {
                headers.insert(header.clone(), result_json);
                self.image_payload(&input.payload, detections)?
            }
            None => result_json.into_bytes(),
        };

        debug!(
            result_bytes,
            annotated = self.config.draw_bounding_box,
            result_header = self.config.result_header.as_deref().unwrap_or("<payload>"),
            "built output message"
        );

        Ok(Message { payload, headers })
    }

    fn image_payload<'d>(
        &self,
        image: &[u8],
        detections: impl FnOnce() -> Result<Cow<'d, [Detection]>, BoxlabelError>,
    ) -> Result<Vec<u8>, BoxlabelError> {
        if !self.config.draw_bounding_box {
            return Ok(image.to_vec());
        }
        let detections = match detections() {
            Ok(detections) => detections,
            Err(err) if self.config.failure_policy == FailurePolicy::BestEffort => {
                error!(error = %err, "unreadable detection result; passing original image through");
                return Ok(image.to_vec());
            }
            Err(err) => return Err(err),
        };
        let bytes = self
            .annotator
            .annotate(image, Some(&*detections))
            .resolve(self.config.failure_policy)?;
        Ok(bytes.into_owned())
    }
}
