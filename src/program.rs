use serde::{Deserialize, Serialize};

/// Identity of the host tool: what it is called, which version it is, and a
/// one-line description shown at the top of the usage summary.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: String,
}

impl Program {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Program {
            name: name.into(),
            version: version.into(),
            description: description.into(),
        }
    }

    /// Program named after the running executable (`argv[0]` without its
    /// directory), with empty version and description.
    pub fn from_process() -> Self {
        let name = std::env::args()
            .next()
            .and_then(|arg0| {
                std::path::Path::new(&arg0)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
            })
            .unwrap_or_default();
        Program {
            name,
            ..Default::default()
        }
    }
}

/// Builds a [`Program`] from the calling crate's Cargo metadata.
///
/// ```
/// let p = subcli::program!();
/// assert_eq!(p.name, "subcli");
/// ```
#[macro_export]
macro_rules! program {
    () => {
        $crate::Program::new(
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            env!("CARGO_PKG_DESCRIPTION"),
        )
    };
}
