use chrono::NaiveDate;
use crate::utils::date::DAY_FMT;

pub mod model;

// due_sort of a copy without a due date; sorts before every formatted date
pub(crate) const NO_DUE_DATE: &str = "0000-00-00";

pub(crate) fn due_sort_key(due_back: Option<NaiveDate>) -> String {
    match due_back {
        Some(due) => due.format(DAY_FMT).to_string(),
        None => NO_DUE_DATE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::instances::domain::{due_sort_key, NO_DUE_DATE};

    #[tokio::test]
    async fn test_should_sort_missing_due_date_first() {
        let early = due_sort_key(NaiveDate::from_ymd_opt(1, 1, 1));
        let later = due_sort_key(NaiveDate::from_ymd_opt(2024, 1, 29));
        assert_eq!("2024-01-29", later.as_str());
        assert_eq!(NO_DUE_DATE, due_sort_key(None).as_str());
        assert!(due_sort_key(None) < early);
        assert!(early < later);
    }
}
