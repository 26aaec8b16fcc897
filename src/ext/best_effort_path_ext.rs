use std::{
    env,
    path::{Component, Path, PathBuf},
};

/// Absolute, normalized form of `path` for log and error messages.
///
/// Existing paths are canonicalized; anything else is joined onto the working
/// directory and has `.`/`..` folded lexically.
pub fn best_effort_path_display(path: &Path) -> String {
    if let Ok(canonical) = path.canonicalize() {
        return canonical.display().to_string();
    }

    let absolute = match env::current_dir() {
        Ok(cwd) if path.is_relative() => cwd.join(path),
        _ => path.to_path_buf(),
    };
    fold_components(&absolute).display().to_string()
}

fn fold_components(path: &Path) -> PathBuf {
    path.components()
        .fold(Vec::new(), |mut kept, component| {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    if matches!(kept.last(), Some(Component::Normal(_))) {
                        kept.pop();
                    }
                }
                other => kept.push(other),
            }
            kept
        })
        .into_iter()
        .collect()
}

pub trait BestEffortPathExt {
    fn best_effort_path_display(&self) -> String;
}

impl<P: AsRef<Path> + ?Sized> BestEffortPathExt for P {
    fn best_effort_path_display(&self) -> String {
        best_effort_path_display(self.as_ref())
    }
}
