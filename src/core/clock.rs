use chrono::{NaiveDate, Utc};

// Clock supplies "today" so one request reads the date once and tests can pin it.
pub(crate) trait Clock: Sync + Send {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub(crate) fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }
}
