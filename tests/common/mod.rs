use std::path::Path;

use sandbox_fs::{AllowedRoots, Context};

pub fn context(roots: &[&Path]) -> Context {
    let dirs: Vec<String> = roots
        .iter()
        .map(|root| root.to_string_lossy().into_owned())
        .collect();
    Context::new(AllowedRoots::new(&dirs).expect("allowed roots"))
}

pub fn single_root(root: &Path) -> Context {
    context(&[root])
}
