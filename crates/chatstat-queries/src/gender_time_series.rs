//! Messages per time bucket, split by sender gender

use chatstat_core::{
    Cell, ContextKey, Granularity, Message, Query, QueryContext, QueryOutput, Result, Table,
};
use chatstat_ids::Gender;
use indexmap::IndexMap;

pub const ID: &str = "gender_time_series";

const GENDER_COLUMNS: [Gender; 3] = [Gender::Female, Gender::Male, Gender::Unknown];

/// One row per bucket in ascending order, one count column per gender
#[derive(Debug, Clone, Default)]
pub struct GenderTimeSeriesQuery {
    granularity: Granularity,
}

impl GenderTimeSeriesQuery {
    pub fn new(granularity: Granularity) -> Self {
        Self { granularity }
    }
}

impl Query for GenderTimeSeriesQuery {
    fn id(&self) -> &str {
        ID
    }

    fn granularity(&self) -> Granularity {
        self.granularity
    }

    fn required_context(&self) -> &[ContextKey] {
        &[ContextKey::UsersMap]
    }

    fn compute(&self, messages: &[Message], context: &QueryContext<'_>) -> Result<QueryOutput> {
        let users = context.users(ID)?;

        let mut series: IndexMap<String, [usize; 3]> = IndexMap::new();
        for message in messages {
            let (_, gender) = users.resolve(&message.sender_id);
            let column = GENDER_COLUMNS
                .iter()
                .position(|g| *g == gender)
                .unwrap_or(GENDER_COLUMNS.len() - 1);
            series
                .entry(self.bucket(message.timestamp_ms))
                .or_default()[column] += 1;
        }

        series.sort_keys();

        let mut columns = vec!["date"];
        columns.extend(GENDER_COLUMNS.iter().map(Gender::as_str));
        let mut table = Table::new(columns);
        for (date, counts) in series {
            let mut row = vec![Cell::from(date)];
            row.extend(counts.into_iter().map(Cell::from));
            table.push_row(row);
        }

        Ok(QueryOutput::Table(table))
    }
}
