use crate::error::{FinanceCoreError, Result};
use crate::schema::Scope;

/// The concrete resource an analytics request targets, after access checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedScope {
    Personal { user_id: i64 },
    Company { company_id: String },
}

impl ResolvedScope {
    pub fn scope(&self) -> Scope {
        match self {
            ResolvedScope::Personal { .. } => Scope::Personal,
            ResolvedScope::Company { .. } => Scope::Company,
        }
    }

    pub fn resource_id(&self) -> String {
        match self {
            ResolvedScope::Personal { user_id } => user_id.to_string(),
            ResolvedScope::Company { company_id } => company_id.clone(),
        }
    }
}

/// Validates a scope selection against the authenticated caller.
///
/// Personal requests default to the caller and may not target another user.
/// Company requests must name the company.
pub fn resolve_scope(
    scope_tag: &str,
    resource_id: Option<&str>,
    caller_user_id: &str,
) -> Result<ResolvedScope> {
    match scope_tag.parse::<Scope>()? {
        Scope::Personal => {
            let caller = parse_user_id(caller_user_id)?;
            let requested = match resource_id {
                Some(id) => parse_user_id(id)?,
                None => caller,
            };

            if requested != caller {
                return Err(FinanceCoreError::CrossUserAccess { requested, caller });
            }

            Ok(ResolvedScope::Personal { user_id: requested })
        }
        Scope::Company => match resource_id.map(str::trim) {
            Some(id) if !id.is_empty() => Ok(ResolvedScope::Company {
                company_id: id.to_string(),
            }),
            _ => Err(FinanceCoreError::MissingCompanyId),
        },
    }
}

pub fn parse_user_id(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| FinanceCoreError::InvalidUserId(raw.to_string()))
}
