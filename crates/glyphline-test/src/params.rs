//! Check recorder for `*_reg` tests

use glyphline_core::Pix;

/// Running tally of one regression test
///
/// Checks are numbered from 1 and never panic. A failed check prints its
/// detail right away and is kept for the summary printed by
/// [`RegParams::cleanup`], which the test asserts on last.
pub struct RegParams {
    pub test_name: String,
    index: usize,
    failures: Vec<String>,
}

impl RegParams {
    pub fn new(test_name: &str) -> Self {
        eprintln!("\n==== {}_reg ====", test_name);
        Self {
            test_name: test_name.to_string(),
            index: 0,
            failures: Vec::new(),
        }
    }

    /// Number of checks run so far
    pub fn index(&self) -> usize {
        self.index
    }

    fn record(&mut self, ok: bool, detail: impl FnOnce() -> String) -> bool {
        self.index += 1;
        if !ok {
            let msg = format!("{}_reg check {}: {}", self.test_name, self.index, detail());
            eprintln!("{}", msg);
            self.failures.push(msg);
        }
        ok
    }

    /// `actual` lies within `delta` of `expected`
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        let diff = (expected - actual).abs();
        self.record(diff <= delta, || {
            format!("expected {expected}, got {actual} (off by {diff}, allowed {delta})")
        })
    }

    /// Byte-for-byte equality, shown as lossy UTF-8 on failure
    pub fn compare_strings(&mut self, expected: &[u8], actual: &[u8]) -> bool {
        self.record(expected == actual, || {
            format!(
                "text differs\n  expected: {:?}\n  actual:   {:?}",
                String::from_utf8_lossy(expected),
                String::from_utf8_lossy(actual)
            )
        })
    }

    /// Same geometry and the same value at every pixel
    pub fn compare_pix(&mut self, expected: &Pix, actual: &Pix) -> bool {
        let geometry = |p: &Pix| (p.width(), p.height(), p.depth().bits());
        if !expected.sizes_equal(actual) {
            let (e, a) = (geometry(expected), geometry(actual));
            return self.record(false, || format!("image geometry {:?} vs {:?}", e, a));
        }
        let first_diff = (0..expected.height())
            .flat_map(|y| (0..expected.width()).map(move |x| (x, y)))
            .find(|&(x, y)| expected.get_pixel(x, y) != actual.get_pixel(x, y));
        self.record(first_diff.is_none(), || {
            format!("images first differ at {:?}", first_diff.unwrap_or_default())
        })
    }

    /// Plain boolean check labelled `what`
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.record(condition, || format!("failed: {what}"))
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// Print the summary; `true` when every check passed.
    pub fn cleanup(self) -> bool {
        if self.is_success() {
            eprintln!("{}_reg: {} checks passed", self.test_name, self.index);
        } else {
            eprintln!(
                "{}_reg: {} of {} checks failed",
                self.test_name,
                self.failures.len(),
                self.index
            );
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        self.is_success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_within_delta_pass() {
        let mut rp = RegParams::new("params");
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
    }

    #[test]
    fn test_failure_is_recorded() {
        let mut rp = RegParams::new("params");
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(rp.check(true, "fine"));
        assert_eq!(rp.failures().len(), 1);
        assert!(rp.failures()[0].contains("check 1"));
    }

    #[test]
    fn test_strings_and_index() {
        let mut rp = RegParams::new("params");
        assert!(rp.compare_strings(b"a 1 2 3 4 0\n", b"a 1 2 3 4 0\n"));
        assert!(!rp.compare_strings(b"a", b"b"));
        assert_eq!(rp.index(), 2);
        assert!(!rp.cleanup());
    }
}
