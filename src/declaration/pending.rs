//! Staged contract declarations and the per-class slot that holds them until
//! the next method definition.

use crate::validation::{Contract, ContractError};
use crate::value::{Kind, Value};
use tracing::{debug, trace};

/// One element of a declaration call.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclArg {
    /// A positional argument contract.
    Contract(Contract),
    /// The trailing `{ return_contract => marker }` clause. Well-formed
    /// declarations carry exactly one entry here.
    Returns(Vec<(Contract, Value)>),
}

/// Builds the conventional single-entry return clause.
pub fn returns(contract: impl Into<Contract>) -> DeclArg {
    DeclArg::Returns(vec![(contract.into(), Value::Bool(true))])
}

impl From<Contract> for DeclArg {
    fn from(c: Contract) -> Self { DeclArg::Contract(c) }
}

impl From<Kind> for DeclArg {
    fn from(k: Kind) -> Self { DeclArg::Contract(Contract::Kind(k)) }
}

/// A declaration as staged by a keyword: who staged it and the raw arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub keyword: String,
    pub args: Vec<DeclArg>,
}

impl Declaration {
    pub fn new(keyword: impl Into<String>, args: Vec<DeclArg>) -> Self {
        Self { keyword: keyword.into(), args }
    }

    /// Splits the declaration into ordered argument contracts and the return
    /// contract.
    ///
    /// The last element must be a single-entry return clause; a return clause in
    /// any other position is not a contract and is rejected the same way.
    pub fn split(self, method: &str) -> Result<(Vec<Contract>, Contract), ContractError> {
        let malformed = || ContractError::MalformedDeclaration { method: method.to_string() };

        let mut args = self.args;
        let return_contract = match args.pop() {
            Some(DeclArg::Returns(mut clause)) if clause.len() == 1 => {
                clause.pop().map(|(contract, _marker)| contract).ok_or_else(malformed)?
            }
            _ => return Err(malformed()),
        };

        let arg_contracts = args
            .into_iter()
            .map(|arg| match arg {
                DeclArg::Contract(c) => Ok(c),
                DeclArg::Returns(_) => Err(malformed()),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok((arg_contracts, return_contract))
    }
}

/// Declarations staged since the last method definition in a class body.
#[derive(Debug, Default)]
pub struct PendingSlot {
    staged: Vec<Declaration>,
}

impl PendingSlot {
    pub fn new() -> Self { Self::default() }
    pub fn len(&self) -> usize { self.staged.len() }
    pub fn is_empty(&self) -> bool { self.staged.is_empty() }
    pub fn staged(&self) -> &[Declaration] { &self.staged }

    pub fn push(&mut self, declaration: Declaration) {
        trace!(keyword = %declaration.keyword, staged = self.staged.len() + 1, "staged contract declaration");
        self.staged.push(declaration);
    }

    /// Empties the slot and hands back the first staged declaration.
    ///
    /// Anything staged after the first is dropped.
    pub fn take_first(&mut self) -> Option<Declaration> {
        let staged = std::mem::take(&mut self.staged);
        if staged.len() > 1 {
            debug!(discarded = staged.len() - 1, "only the first staged declaration is consumed");
        }
        staged.into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(args: Vec<DeclArg>) -> Declaration {
        Declaration::new("contract", args)
    }

    #[test]
    fn test_split_well_formed() {
        let d = decl(vec![Contract::NUM.into(), Contract::STR.into(), returns(Contract::BOOL)]);
        let (args, ret) = d.split("f").unwrap();
        assert_eq!(args, vec![Contract::NUM, Contract::STR]);
        assert_eq!(ret, Contract::BOOL);
    }

    #[test]
    fn test_split_return_only() {
        let (args, ret) = decl(vec![returns(Kind::Nil)]).split("f").unwrap();
        assert!(args.is_empty());
        assert_eq!(ret, Contract::NIL);
    }

    #[test]
    fn test_split_rejects_missing_return_clause() {
        let err = decl(vec![Contract::NUM.into(), Contract::NUM.into()]).split("add").unwrap_err();
        assert_eq!(err, ContractError::MalformedDeclaration { method: "add".into() });
    }

    #[test]
    fn test_split_rejects_empty_and_multi_entry_clauses() {
        assert!(decl(vec![]).split("f").is_err());
        assert!(decl(vec![DeclArg::Returns(vec![])]).split("f").is_err());
        let two = DeclArg::Returns(vec![(Contract::NUM, Value::Bool(true)), (Contract::STR, Value::Bool(true))]);
        assert!(decl(vec![two]).split("f").is_err());
    }

    #[test]
    fn test_split_rejects_return_clause_in_argument_position() {
        let d = decl(vec![returns(Contract::NUM), returns(Contract::NUM)]);
        assert!(matches!(d.split("f"), Err(ContractError::MalformedDeclaration { .. })));
    }

    #[test]
    fn test_take_first_consumes_only_the_first() {
        let mut slot = PendingSlot::new();
        slot.push(decl(vec![returns(Contract::NUM)]));
        slot.push(decl(vec![returns(Contract::STR)]));
        assert_eq!(slot.len(), 2);

        let first = slot.take_first().unwrap();
        assert_eq!(first.args, vec![returns(Contract::NUM)]);
        assert!(slot.is_empty());
        assert!(slot.take_first().is_none());
    }
}
