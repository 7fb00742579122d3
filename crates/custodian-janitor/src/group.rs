//! Fan-out cleanup across independent backends

use custodian_domain::Cleaner;

/// Runs every registered cleanup action for an identifier and applies the
/// group failure policy.
///
/// Every action gets a chance to run; a failing member never short-circuits
/// the rest. The group reports failure only when all members failed, so one
/// transiently unavailable backend does not stop the others from freeing
/// their resources. Individual failures go to the log; the swallowed count
/// is available through [`CleanerGroup::clean_counted`].
///
/// # Examples
///
/// ```
/// use custodian_janitor::CleanerGroup;
/// use custodian_domain::Cleaner;
///
/// struct Nop;
/// impl Cleaner for Nop {
///     fn clean(&self, _id: &str) -> anyhow::Result<()> {
///         Ok(())
///     }
/// }
///
/// let mut group = CleanerGroup::new();
/// group.add(Box::new(Nop));
/// assert!(group.clean("abc").is_ok());
/// ```
#[derive(Default)]
pub struct CleanerGroup {
    jobs: Vec<Box<dyn Cleaner>>,
}

impl CleanerGroup {
    /// Create an empty group
    pub fn new() -> Self {
        Self { jobs: Vec::new() }
    }

    /// Add a cleanup action to the group
    pub fn add(&mut self, job: Box<dyn Cleaner>) {
        self.jobs.push(job);
    }

    /// Number of registered actions
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// True when no actions are registered
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Run every action for `id`, reporting how many failed underneath a
    /// group that still counts as cleaned.
    ///
    /// `Ok(0)` is a clean success. `Ok(n)` means `n` actions failed but at
    /// least one succeeded, so the group succeeded and swallowed those
    /// failures; callers record the count so a persistently failing backend
    /// stays visible. `Err` means every action failed.
    pub fn clean_counted(&self, id: &str) -> anyhow::Result<usize> {
        let mut failed = 0;
        for job in &self.jobs {
            if let Err(err) = job.clean(id) {
                tracing::error!("Cleanup action failed for {}: {}", id, err);
                failed += 1;
            }
        }
        // zero actions means nothing could fail
        if failed > 0 && failed == self.jobs.len() {
            anyhow::bail!("all {} cleanup actions failed for {}", failed, id);
        }
        if failed > 0 {
            tracing::warn!(
                "Swallowed {} of {} cleanup failures for {}",
                failed,
                self.jobs.len(),
                id
            );
        }
        Ok(failed)
    }
}

impl Cleaner for CleanerGroup {
    fn clean(&self, id: &str) -> anyhow::Result<()> {
        self.clean_counted(id).map(|_| ())
    }
}
