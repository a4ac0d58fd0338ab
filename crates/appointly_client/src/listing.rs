//! Admin appointment table: filtering and pagination.

use appointly_common::Appointment;

/// Column headers, in display order.
pub const TABLE_COLUMNS: [&str; 7] = [
    "Customer Name",
    "Branch",
    "Date",
    "Time Slot",
    "Confirmation Code",
    "Email",
    "Cellphone",
];

pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone)]
pub struct AppointmentListing {
    all: Vec<Appointment>,
    query: String,
    current_page: usize,
    page_size: usize,
}

impl Default for AppointmentListing {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl AppointmentListing {
    /// A zero page size falls back to [`DEFAULT_PAGE_SIZE`].
    pub fn new(page_size: usize) -> Self {
        Self {
            all: Vec::new(),
            query: String::new(),
            current_page: 1,
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
        }
    }

    /// Replaces the appointments and returns to the first page.
    pub fn load(&mut self, appointments: Vec<Appointment>) {
        self.all = appointments;
        self.current_page = 1;
    }

    /// Sets the filter text and returns to the first page.
    pub fn set_filter(&mut self, query: &str) {
        self.query = query.to_lowercase();
        self.current_page = 1;
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Appointments whose customer name or branch contains the filter text,
    /// ignoring case.
    pub fn filtered(&self) -> Vec<&Appointment> {
        self.all
            .iter()
            .filter(|appt| {
                let matches = |field: &Option<String>| {
                    field
                        .as_deref()
                        .unwrap_or_default()
                        .to_lowercase()
                        .contains(&self.query)
                };
                matches(&appt.customer_name) || matches(&appt.branch)
            })
            .collect()
    }

    pub fn total_pages(&self) -> usize {
        self.filtered().len().div_ceil(self.page_size)
    }

    /// Moves to `page`, clamped to the pages that exist (at least page 1).
    pub fn go_to(&mut self, page: usize) -> usize {
        let last = self.total_pages().max(1);
        self.current_page = page.clamp(1, last);
        self.current_page
    }

    /// The slice of filtered appointments on the current page.
    pub fn page(&self) -> Vec<&Appointment> {
        let start = (self.current_page - 1) * self.page_size;
        self.filtered()
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .collect()
    }

    pub fn page_rows(&self) -> Vec<[String; 7]> {
        self.page().into_iter().map(appointment_row).collect()
    }
}

/// One table row; missing fields become empty cells.
pub fn appointment_row(appt: &Appointment) -> [String; 7] {
    [
        &appt.customer_name,
        &appt.branch,
        &appt.date,
        &appt.time_slot,
        &appt.confirmation_code,
        &appt.email,
        &appt.cellphone,
    ]
    .map(|field| field.clone().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appt(name: &str, branch: &str) -> Appointment {
        Appointment {
            customer_name: Some(name.to_string()),
            branch: Some(branch.to_string()),
            ..Appointment::default()
        }
    }

    fn sample() -> Vec<Appointment> {
        vec![
            appt("Ada", "Main"),
            appt("Grace", "North"),
            appt("Alan", "Main"),
            appt("Barbara", "South"),
            appt("Edsger", "north-east"),
            appt("Donald", "Main"),
            appt("Ken", "West"),
        ]
    }

    #[test]
    fn test_pagination_without_filter() {
        let mut listing = AppointmentListing::default();
        listing.load(sample());
        assert_eq!(listing.total_pages(), 2);
        assert_eq!(listing.page().len(), 5);

        listing.go_to(2);
        let names: Vec<_> = listing
            .page()
            .iter()
            .map(|a| a.customer_name.clone().unwrap())
            .collect();
        assert_eq!(names, vec!["Donald", "Ken"]);
    }

    #[test]
    fn test_filter_matches_name_or_branch_case_insensitive() {
        let mut listing = AppointmentListing::new(5);
        listing.load(sample());
        listing.go_to(2);

        listing.set_filter("NORTH");
        assert_eq!(listing.current_page(), 1);
        assert_eq!(listing.filtered().len(), 2);

        listing.set_filter("al");
        // "Alan" by name; "Donald" contains "al" too.
        assert_eq!(listing.filtered().len(), 2);

        listing.set_filter("nobody");
        assert!(listing.page().is_empty());
        assert_eq!(listing.total_pages(), 0);
        assert_eq!(listing.go_to(3), 1);
    }

    #[test]
    fn test_go_to_clamps() {
        let mut listing = AppointmentListing::new(3);
        listing.load(sample());
        assert_eq!(listing.total_pages(), 3);
        assert_eq!(listing.go_to(0), 1);
        assert_eq!(listing.go_to(99), 3);
        assert_eq!(listing.page().len(), 1);
    }

    #[test]
    fn test_missing_fields_render_empty_and_do_not_match() {
        let mut listing = AppointmentListing::new(0);
        assert_eq!(listing.page_size(), DEFAULT_PAGE_SIZE);
        listing.load(vec![Appointment {
            confirmation_code: Some("XYZ".into()),
            ..Appointment::default()
        }]);

        let rows = listing.page_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][4], "XYZ");
        assert_eq!(rows[0][0], "");

        listing.set_filter("x");
        assert!(listing.filtered().is_empty());
    }
}
