use crate::wire::HealthRes;

/// Simple health service shared by the HealthChat binaries
///
/// Reports liveness together with the number of loaded disease records, so a probe can tell
/// an empty dataset apart from a healthy one.
#[derive(Clone, Debug, Default)]
pub struct HealthService {
    disease_count: usize,
}

impl HealthService {
    /// Creates a new instance of HealthService.
    ///
    /// # Arguments
    /// * `disease_count` - Number of disease records loaded at startup.
    pub fn new(disease_count: usize) -> Self {
        Self { disease_count }
    }

    /// Check health.
    ///
    /// # Returns
    /// A `HealthRes` that is `ok` when at least one disease record is loaded.
    pub fn check_health(&self) -> HealthRes {
        if self.disease_count == 0 {
            return HealthRes {
                ok: false,
                message: "HealthChat is alive but has no disease records".into(),
            };
        }
        HealthRes {
            ok: true,
            message: format!(
                "HealthChat is alive ({} disease records)",
                self.disease_count
            ),
        }
    }
}
