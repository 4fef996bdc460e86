/// Source of the initial password handed to a newly provisioned driver.
pub trait InitialPasswordGenerator: Send + Sync {
    fn generate(&self) -> String;
}
