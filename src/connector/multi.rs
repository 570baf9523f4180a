use tracing::{debug, warn};

use super::Connector;
use crate::error::ConnectorError;
use crate::params::{Bindings, Params};
use crate::placeholders::split_statements;

impl Connector {
    /// Run each `;`-separated statement of the pending template in order.
    ///
    /// Statement *i* is bound to parameter set *i* of a `Vec<Params>` binding; with no bindings
    /// every statement runs without parameters. Returns `true` once every statement has run.
    ///
    /// Execution stops at the first statement the driver rejects and that error is returned.
    /// Statements that already ran stay applied; nothing is rolled back.
    ///
    /// # Errors
    /// `UsageError` when unprepared, when the bindings are a single named set, when the number of
    /// statements and parameter sets differ, or when a statement's placeholders do not match its
    /// set. These checks happen before any statement is sent. Otherwise the first driver failure.
    pub async fn m_modify(&mut self) -> Result<bool, ConnectorError> {
        let stmt = self
            .pending
            .take()
            .ok_or_else(|| ConnectorError::usage("m_modify() called before prepare()"))?;

        let dialect = self.dialect();
        let statements = split_statements(&stmt.sql, dialect);
        if statements.is_empty() {
            return Err(ConnectorError::usage("m_modify() given an empty template"));
        }

        let sets: Vec<Params> = match stmt.bindings {
            Bindings::None => vec![Params::new(); statements.len()],
            Bindings::PerStatement(sets) => sets,
            Bindings::Named(_) => {
                return Err(ConnectorError::usage(
                    "m_modify() needs one parameter set per statement, got a single named set",
                ));
            }
        };
        if sets.len() != statements.len() {
            return Err(ConnectorError::usage(format!(
                "m_modify() got {} statements but {} parameter sets",
                statements.len(),
                sets.len()
            )));
        }
        for (i, (sql, params)) in statements.iter().zip(&sets).enumerate() {
            params.check_against(sql, dialect).map_err(|e| {
                ConnectorError::usage(format!("statement {i} of m_modify(): {e}"))
            })?;
        }

        let mut executed = 0;
        for (i, (sql, params)) in statements.iter().zip(&sets).enumerate() {
            if let Err(e) = self.run_statement(sql, params).await {
                warn!(statement = i, executed, error = %e, "m_modify stopped at failed statement");
                return Err(e);
            }
            executed += 1;
        }
        debug!(executed, total = statements.len(), "m_modify finished");

        Ok(executed == statements.len())
    }
}
