// Pool domain model

/// One tracked swimming facility. The label is the text that marks its
/// guest-count value on the shared status page.
#[derive(Debug, Clone)]
pub struct Pool {
    pub id: String,
    pub name: String,
    pub label: String,
}

impl Pool {
    pub fn new(id: String, name: String, label: String) -> Self {
        Self { id, name, label }
    }

    /// File name of this pool's CSV record file inside the data directory.
    pub fn csv_file_name(&self) -> String {
        format!("{}_guests.csv", self.id)
    }

    /// File name of this pool's chart image inside the data directory.
    pub fn chart_file_name(&self) -> String {
        format!("{}_visualization.png", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names_derive_from_id() {
        let pool = Pool::new(
            "oerlikon".to_string(),
            "Hallenbad Oerlikon".to_string(),
            "Hallenbad Oerlikon".to_string(),
        );
        assert_eq!(pool.csv_file_name(), "oerlikon_guests.csv");
        assert_eq!(pool.chart_file_name(), "oerlikon_visualization.png");
    }
}
