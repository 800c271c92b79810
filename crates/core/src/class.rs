//! Class trait: identified, addressable API objects.

use crate::wire::Wire;

/// Common interface of the API object types that carry an identity.
///
/// Class types are serialized with a `kind` attribute. A full object uses
/// [`Class::KIND`]; a reference to an object (only `id`/`href` meaningful) uses
/// [`Class::LINK_KIND`]. Collections of the type use the list kinds.
pub trait Class: Wire + Clone {
    const KIND: &'static str;
    const LINK_KIND: &'static str;
    const LIST_KIND: &'static str;
    const LIST_LINK_KIND: &'static str;

    fn id(&self) -> Option<&str>;

    fn href(&self) -> Option<&str>;

    /// True when the object is only a reference to the real object.
    fn is_link(&self) -> bool;

    fn set_id(&mut self, id: Option<String>);

    fn set_href(&mut self, href: Option<String>);

    /// Overwrites the attributes that are set in `patch`, leaving the rest untouched.
    ///
    /// Identity (`id`, `href`, `link`) is never changed by a merge.
    fn merge(&mut self, patch: Self);
}
