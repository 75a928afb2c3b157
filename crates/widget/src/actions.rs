//! Action capability gate.
//!
//! Given the current selection and the resolved capabilities, the gate
//! computes exactly which actions the renderer may offer. The interface is a
//! fixed, explicit field set ([`ActionContext`] in, [`ActionList`] out);
//! renderers consume the result instead of injecting their own action logic.
//!
//! The gate is a pure function over its context. The busy state clears when
//! the host pushes fresh collection data whose render context no longer
//! carries pending tags; there is no local timer.

use serde::{Deserialize, Serialize};

/// An operation the host is still applying to a selected item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PendingOperation {
    /// Deletion in flight.
    Delete,
    /// Rename in flight.
    Rename,
    /// Move in flight.
    Move,
}

impl PendingOperation {
    /// Progress text shown while the operation is in flight.
    pub fn label(self) -> &'static str {
        match self {
            PendingOperation::Delete => "Deleting ...",
            PendingOperation::Rename => "Renaming ...",
            PendingOperation::Move => "Moving ...",
        }
    }
}

/// One highlighted entry, as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedItem {
    /// Entry key.
    pub key: String,
    /// Whether the entry is synthetic (e.g. a folder materialized mid-edit)
    /// rather than backed by a collection record.
    pub derived: bool,
    /// Operation tag set by the renderer while the host applies a mutation.
    pub pending: Option<PendingOperation>,
}

impl SelectedItem {
    /// A concrete item with no pending operation.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            derived: false,
            pending: None,
        }
    }

    /// Mark the item as synthetic.
    pub fn derived(mut self) -> Self {
        self.derived = true;
        self
    }

    /// Tag the item with an in-flight operation.
    pub fn pending(mut self, operation: PendingOperation) -> Self {
        self.pending = Some(operation);
        self
    }
}

/// The render-time inputs the gate decides from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionContext {
    /// Currently highlighted entries. Empty means the root is in focus.
    pub selection: Vec<SelectedItem>,
    /// Whether the selection is folder-kind.
    pub is_folder: bool,
    /// Active name filter, if the user is filtering the tree.
    pub name_filter: Option<String>,
}

/// An action the renderer may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Create a folder at the root.
    CreateFolder,
    /// Create a folder inside the selected folder.
    CreateSubfolder,
    /// Rename the selected file.
    RenameFile,
    /// Rename the selected folder.
    RenameFolder,
    /// Delete the selected files.
    DeleteFile,
    /// Download the selected files.
    DownloadFile,
    /// Download the selected folder.
    DownloadFolder,
    /// Choose the selected files.
    ChooseFile,
    /// Choose the selected folders.
    ChooseFolder,
}

/// What the action region should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionList {
    /// A mutation is in flight: render only a progress indicator.
    Busy(PendingOperation),
    /// Offer these actions, in order.
    Available(Vec<Action>),
    /// Nothing to offer; render an empty region so the layout height stays
    /// stable for the height reconciler.
    Placeholder,
}

/// The per-kind capabilities the gate decides against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionCapabilities {
    /// Folder creation.
    pub create_folder: bool,
    /// File rename.
    pub rename_file: bool,
    /// Folder rename.
    pub rename_folder: bool,
    /// File deletion.
    pub delete_file: bool,
    /// File download.
    pub download_file: bool,
    /// Folder download.
    pub download_folder: bool,
    /// File choose.
    pub choose_file: bool,
    /// Folder choose.
    pub choose_folder: bool,
}

/// Computes the action list for a render.
#[derive(Debug, Clone)]
pub struct ActionGate {
    capabilities: ActionCapabilities,
}

impl ActionGate {
    /// Create a gate with the given capabilities.
    pub fn new(capabilities: ActionCapabilities) -> Self {
        Self { capabilities }
    }

    /// The capabilities this gate decides against.
    pub fn capabilities(&self) -> &ActionCapabilities {
        &self.capabilities
    }

    /// Compute the exact action list for the current render.
    pub fn compute(&self, ctx: &ActionContext) -> ActionList {
        let caps = &self.capabilities;
        let filter_active = ctx
            .name_filter
            .as_deref()
            .is_some_and(|filter| !filter.is_empty());

        if ctx.selection.is_empty() {
            // Root focus: adding a folder is the only candidate.
            if caps.create_folder && !filter_active {
                return ActionList::Available(vec![Action::CreateFolder]);
            }
            return ActionList::Placeholder;
        }

        if let Some(operation) = homogeneous_pending(&ctx.selection) {
            return ActionList::Busy(operation);
        }

        let all_concrete = ctx.selection.iter().all(|item| !item.derived);
        let single = ctx.selection.len() == 1;
        let mut actions = Vec::new();

        if ctx.is_folder && caps.create_folder && !filter_active {
            actions.push(Action::CreateSubfolder);
        }

        if all_concrete && single {
            if ctx.is_folder && caps.rename_folder {
                actions.push(Action::RenameFolder);
            } else if !ctx.is_folder && caps.rename_file {
                actions.push(Action::RenameFile);
            }
        }

        // Folder deletion is never offered, whatever the capabilities say.
        if all_concrete && !ctx.is_folder && caps.delete_file {
            actions.push(Action::DeleteFile);
        }

        if ctx.is_folder {
            if caps.download_folder {
                actions.push(Action::DownloadFolder);
            }
        } else if caps.download_file {
            actions.push(Action::DownloadFile);
        }

        if ctx.is_folder {
            if caps.choose_folder {
                actions.push(Action::ChooseFolder);
            }
        } else if caps.choose_file {
            actions.push(Action::ChooseFile);
        }

        if actions.is_empty() {
            ActionList::Placeholder
        } else {
            ActionList::Available(actions)
        }
    }
}

/// The shared pending operation when every selected item carries the same
/// tag, `None` otherwise.
fn homogeneous_pending(selection: &[SelectedItem]) -> Option<PendingOperation> {
    let first = selection.first()?.pending?;
    selection
        .iter()
        .all(|item| item.pending == Some(first))
        .then_some(first)
}
