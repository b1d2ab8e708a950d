//! User-facing copy for loading, empty and failure states.

use storefront_client::ErrorClass;

pub const LOADING: &str = "Loading products…";
pub const EMPTY_CATALOG: &str = "There are no products in the catalog yet.";
pub const NO_RESULTS: &str = "No products match your filters.";
/// Shown whatever caused the fallback, so it names no particular failure.
pub const FALLBACK_NOTICE: &str =
    "The live catalog isn't available right now, so you're looking at sample products.";

/// Title and hint shown in an error panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCopy {
    pub title: &'static str,
    pub hint: &'static str,
}

/// Copy for a 4xx response. Statuses without their own wording share a
/// generic message.
#[must_use]
pub fn client_error_copy(status: u16) -> ErrorCopy {
    match status {
        400 => ErrorCopy {
            title: "The request was invalid",
            hint: "Try clearing your filters and searching again.",
        },
        401 | 403 => ErrorCopy {
            title: "You're not authorised to view this",
            hint: "Sign in again, then retry.",
        },
        404 => not_found_copy(),
        408 => ErrorCopy {
            title: "The request timed out",
            hint: "Check your connection and retry.",
        },
        429 => ErrorCopy {
            title: "Too many requests",
            hint: "Please wait a moment before trying again.",
        },
        _ => ErrorCopy {
            title: "Something went wrong with this request",
            hint: "Please retry. If it keeps happening, contact support.",
        },
    }
}

#[must_use]
pub fn not_found_copy() -> ErrorCopy {
    ErrorCopy {
        title: "Product not found",
        hint: "It may have been removed or the link is out of date.",
    }
}

#[must_use]
pub fn no_selection_copy() -> ErrorCopy {
    ErrorCopy {
        title: "No product was selected",
        hint: "Pick a product from the catalog to see its details.",
    }
}

/// Copy for any failure class. Only client errors reach the user while the
/// sample fallback is enabled; the others show up here when it is disabled.
#[must_use]
pub fn error_copy(class: ErrorClass) -> ErrorCopy {
    match class {
        ErrorClass::Client { status } => client_error_copy(status),
        ErrorClass::Network => ErrorCopy {
            title: "We couldn't reach the store",
            hint: "Check your connection and retry.",
        },
        ErrorClass::Server { .. } => ErrorCopy {
            title: "The store is having trouble",
            hint: "Please try again in a few minutes.",
        },
        ErrorClass::Validation => ErrorCopy {
            title: "The store sent something we couldn't read",
            hint: "Please try again in a few minutes.",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_statuses_get_distinct_copy() {
        let statuses = [400, 401, 404, 408, 429, 418];
        let titles: Vec<&str> = statuses
            .iter()
            .map(|s| client_error_copy(*s).title)
            .collect();
        for (i, a) in titles.iter().enumerate() {
            for b in &titles[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn unauthorised_and_forbidden_share_copy() {
        assert_eq!(client_error_copy(401), client_error_copy(403));
    }

    #[test]
    fn client_class_uses_status_copy() {
        assert_eq!(
            error_copy(ErrorClass::Client { status: 404 }),
            not_found_copy()
        );
    }
}
