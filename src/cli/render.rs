//! Plain-text views of wizard state. Colors are applied by `output`.

use crate::reference::{self, AccessOption};
use crate::wizard::{FinishedAggregate, LinkAccountManager, LinkAccountRow, StepStatus};

/// One-line progress indicator, e.g. `(✓) Business Info - [2] Contact details`.
pub fn progress_line(progress: &[StepStatus]) -> String {
    progress
        .iter()
        .map(|status| {
            if status.completed {
                format!("(✓) {}", status.name)
            } else if status.active {
                format!("[{}] {}", status.id, status.name)
            } else {
                format!("({}) {}", status.id, status.name)
            }
        })
        .collect::<Vec<_>>()
        .join(" - ")
}

pub fn link_rows(rows: &[LinkAccountRow]) -> Vec<String> {
    if rows.is_empty() {
        return vec!["No accounts connected yet.".to_string()];
    }
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            format!("{}. {} {}  {}", index + 1, row.icon.glyph(), row.platform, row.url)
        })
        .collect()
}

pub fn access_options(options: &[AccessOption]) -> Vec<String> {
    options
        .iter()
        .map(|option| format!("{}: {}", option.title, option.description))
        .collect()
}

fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

pub fn summary(aggregate: &FinishedAggregate) -> Vec<String> {
    let business = aggregate.business_info();
    let contact = aggregate.contact_details();
    let address = &business.address;

    let address_line = [
        address.street.as_deref(),
        address.apartment.as_deref(),
        Some(address.city.as_str()),
        Some(address.state.as_str()),
        Some(address.post_code.as_str()),
        Some(business.country.as_str()),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(", ");

    let mut lines = vec![
        format!("Business: {} ({})", business.business_name, business.company_number),
        format!("VAT number: {}", or_dash(&business.vat_number)),
        format!("Logo: {}", or_dash(&business.logo)),
        format!("Address: {}", address_line),
        format!("Contact: {} <{}>", contact.contact_name, contact.email),
        format!("Phone: {} / landline {}", contact.phone, or_dash(&contact.landline)),
        format!("Linked accounts: {}", aggregate.link_accounts().len()),
    ];
    let editor = LinkAccountManager::from_entries(aggregate.link_accounts().to_vec());
    if !editor.is_empty() {
        lines.extend(link_rows(&editor.rows()).into_iter().map(|row| format!("  {row}")));
    }
    lines
}

/// Lines shown on the display-only final step.
pub fn terminal_step() -> Vec<String> {
    access_options(reference::access_options())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::StepId;

    fn status(id: StepId, name: &'static str, completed: bool, active: bool) -> StepStatus {
        StepStatus {
            id,
            name,
            completed,
            active,
        }
    }

    #[test]
    fn progress_marks_each_state() {
        let line = progress_line(&[
            status(StepId::BusinessInfo, "Business Info", true, false),
            status(StepId::ContactDetails, "Contact details", false, true),
            status(StepId::LinkAccounts, "Link Account", false, false),
        ]);
        assert_eq!(
            line,
            "(✓) Business Info - [2] Contact details - (3) Link Account"
        );
    }

    #[test]
    fn empty_link_rows_show_placeholder() {
        assert_eq!(
            link_rows(&[]),
            vec!["No accounts connected yet.".to_string()]
        );
    }

    #[test]
    fn terminal_step_lists_access_options() {
        let lines = terminal_step();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("People and access"));
    }
}
