use std::sync::Mutex;

use semver::Version;

use crate::domain::{version, Tag};
use crate::error::Result;
use crate::release::{BumpExecutor, BumpOutcome, BumpRequest};

/// Executor that records requests instead of touching a repository
#[derive(Debug)]
pub struct RecordingExecutor {
    current: Version,
    requests: Mutex<Vec<BumpRequest>>,
}

impl RecordingExecutor {
    /// Create an executor whose version file declares `current`
    pub fn new(current: Version) -> Self {
        RecordingExecutor {
            current,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<BumpRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl BumpExecutor for RecordingExecutor {
    fn execute(&self, request: &BumpRequest) -> Result<BumpOutcome> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let next = version::bump(&self.current, request.level);
        Ok(BumpOutcome {
            previous: self.current.clone(),
            message: request.render_message(&next),
            tag: request
                .create_tag
                .then(|| Tag::format(&request.tag_prefix, &next)),
            committed: !request.dry_run,
            pushed: !request.dry_run && request.push,
            next,
        })
    }
}
