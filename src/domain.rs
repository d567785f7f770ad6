// Domain modules
// Issue metadata and the patch file artifact

pub mod issue;
pub mod patchfile;
