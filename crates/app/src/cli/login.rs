use std::io::Write;

use storefront_app::{
    config::IdentityConfig,
    context::AppContext,
    pages::protected::{Entry, ProtectedView},
};

use super::{confirm, failure};

/// Print the login URL, or who is signed in.
pub(crate) fn run(
    context: &AppContext,
    identity: IdentityConfig,
    out: &mut impl Write,
) -> Result<(), String> {
    let mut view = ProtectedView::new(identity);
    view.resolve(context.session.clone());

    match view.enter().map_err(|error| failure(&error))? {
        Entry::Render(session) => confirm(out, &format!("Signed in as {}", session.user_id())),
        Entry::Redirect(url) => confirm(out, &url),
        Entry::Loading => Ok(()),
    }
}
