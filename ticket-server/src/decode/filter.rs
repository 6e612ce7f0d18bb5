//! Train-category filtering.

use super::record::TicketRecord;
use super::schema;

/// Filter tickets by category selector characters.
///
/// Each character of `selectors` is an independent selector; a ticket is
/// kept when it matches any of them. An empty selector string means no
/// filtering. The filter is stable: input order is preserved.
pub fn filter_by_category(tickets: &[TicketRecord], selectors: &str) -> Vec<TicketRecord> {
    if selectors.is_empty() {
        return tickets.to_vec();
    }

    tickets
        .iter()
        .filter(|ticket| selectors.chars().any(|s| matches_selector(ticket, s)))
        .cloned()
        .collect()
}

/// Whether a ticket matches a single category selector (case-insensitive).
///
/// `G`/`D`/`Z`/`T`/`K` select by train-code prefix, `O` selects the
/// leftover bucket, `F`/`S` select by service flag. Unknown selectors
/// match nothing.
pub fn matches_selector(ticket: &TicketRecord, selector: char) -> bool {
    match selector.to_ascii_uppercase() {
        'O' => !has_selector_prefix(&ticket.train_code),
        'F' => has_flag(ticket, schema::FLAG_FUXING),
        'S' => has_flag(ticket, schema::FLAG_SMART_EMU),
        upper => prefixes_for(upper)
            .is_some_and(|prefixes| prefixes.iter().any(|p| ticket.train_code.starts_with(p))),
    }
}

fn prefixes_for(selector: char) -> Option<&'static [&'static str]> {
    schema::CATEGORY_PREFIXES
        .iter()
        .find(|(s, _)| *s == selector)
        .map(|(_, prefixes)| *prefixes)
}

/// Whether the train code starts with any prefix that has a dedicated
/// selector. The `O` bucket is the negation of this, derived from the same
/// table as the prefix selectors.
fn has_selector_prefix(train_code: &str) -> bool {
    schema::CATEGORY_PREFIXES
        .iter()
        .flat_map(|(_, prefixes)| prefixes.iter())
        .any(|prefix| train_code.starts_with(prefix))
}

fn has_flag(ticket: &TicketRecord, flag: &str) -> bool {
    ticket.service_flags.iter().any(|f| f == flag)
}
