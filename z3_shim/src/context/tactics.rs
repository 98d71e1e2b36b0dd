use crate::{handles::Tactic, text, types::err::ErrorKind};

use super::Context;

impl Context {
    to_string_ops! {
        tactic_get_help(Tactic);
    }

    /// The built-in tactic `name`, e.g. `simplify` or `bit-blast`.
    ///
    /// An unknown name is refused by the native library.
    pub fn mk_tactic(&self, name: &str) -> Result<Tactic, ErrorKind> {
        let name = text::to_native("mk_tactic", name)?;
        let raw = self.checked("mk_tactic", |f, c| unsafe { (f.mk_tactic)(c, name.as_ptr()) })?;
        Ok(self.wrap(raw))
    }
}
