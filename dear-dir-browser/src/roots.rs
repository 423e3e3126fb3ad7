use std::path::PathBuf;

/// Source of filesystem roots offered in the drive selector.
pub trait RootsProvider {
    /// Roots available on this machine, in display order.
    fn list_roots(&self) -> Vec<PathBuf>;
}

/// Roots of the running platform: drive letters on Windows, `/` elsewhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRoots;

impl RootsProvider for SystemRoots {
    #[cfg(target_os = "windows")]
    fn list_roots(&self) -> Vec<PathBuf> {
        let mut v = Vec::new();
        for c in b'A'..=b'Z' {
            let p = PathBuf::from(format!("{}:\\", c as char));
            if p.exists() {
                v.push(p);
            }
        }
        v
    }

    #[cfg(not(target_os = "windows"))]
    fn list_roots(&self) -> Vec<PathBuf> {
        vec![PathBuf::from(std::path::MAIN_SEPARATOR.to_string())]
    }
}

/// A fixed list of roots, handy for hosts that sandbox browsing.
#[derive(Clone, Debug, Default)]
pub struct FixedRoots(
    /// Roots in display order
    pub Vec<PathBuf>,
);

impl RootsProvider for FixedRoots {
    fn list_roots(&self) -> Vec<PathBuf> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn posix_has_a_single_root() {
        assert_eq!(SystemRoots.list_roots(), vec![PathBuf::from("/")]);
    }

    #[test]
    fn fixed_roots_are_returned_in_order() {
        let roots = FixedRoots(vec![PathBuf::from("/b"), PathBuf::from("/a")]);
        assert_eq!(
            roots.list_roots(),
            vec![PathBuf::from("/b"), PathBuf::from("/a")]
        );
    }
}
