//! Turn a raw `Location` value into the next URL of the chain.

use url::Url;

use super::check_probeable;
use crate::error::ResolveError;

/// Resolve `location` (as received from `base`) into the next hop.
///
/// Returns the text to carry forward together with its parsed form. Absolute
/// targets keep their verbatim text; relative ones are joined against `base`
/// when `resolve_relative` is set and rejected otherwise.
pub fn redirect_target(
    base: &Url,
    location: &str,
    resolve_relative: bool,
) -> Result<(String, Url), ResolveError> {
    let (text, url) = match Url::parse(location) {
        Ok(url) => (location.to_string(), url),
        Err(url::ParseError::RelativeUrlWithoutBase) if resolve_relative => {
            let joined = base.join(location).map_err(|e| {
                ResolveError::malformed(base.as_str(), format!("bad Location {:?}: {}", location, e))
            })?;
            (joined.to_string(), joined)
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            return Err(ResolveError::malformed(
                base.as_str(),
                format!("relative Location {:?} not allowed", location),
            ));
        }
        Err(e) => {
            return Err(ResolveError::malformed(
                base.as_str(),
                format!("bad Location {:?}: {}", location, e),
            ));
        }
    };

    check_probeable(&url).map_err(|reason| {
        ResolveError::malformed(base.as_str(), format!("Location {:?}: {}", location, reason))
    })?;
    Ok((text, url))
}
