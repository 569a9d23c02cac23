//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code in the client core and CLI MUST NOT call sleep methods.
//! Waiting happens on channels and on `tokio::time::timeout`, never by polling.

use architectural_enforcement::find_violations;

const SLEEPS: &[&str] = &["thread::sleep", "time::sleep", "sleep_until"];

#[test]
fn test_no_sleep_in_production_code() {
    let mut violations = find_violations("summarizer/core/src", SLEEPS);
    violations.extend(find_violations("summarizer/cli/src", SLEEPS));

    if !violations.is_empty() {
        eprintln!("\n❌ CRITICAL: Sleep calls found in production code!\n");
        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }
        eprintln!("\n✅ Wait on the completion channel or wrap the call in a deadline instead.");

        panic!(
            "\nFound {} sleep violation(s) in production code.\nFix these before merging!",
            violations.len()
        );
    }
}
