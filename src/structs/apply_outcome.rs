/// Tally of one batch apply pass.
#[derive(Debug, Default)]
pub struct ApplyOutcome {
    pub applied: usize,
    pub skipped: usize,
    pub warnings: Vec<String>,
}

impl ApplyOutcome {
    pub fn print_summary(&self) {
        println!("✅ {} changes applied", self.applied);
        if self.skipped > 0 {
            println!("⏭️ {} changes skipped", self.skipped);
        }
        for warning in &self.warnings {
            println!("   ⚠️ {}", warning);
        }
    }
}
