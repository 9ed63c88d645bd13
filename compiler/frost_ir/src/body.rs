//! Flat IR for synthesized member bodies.
//!
//! Bodies are stored in a [`BodyArena`] and addressed by [`ExprId`] /
//! [`StmtId`] rather than boxed trees. The arena also carries the small set
//! of node-building primitives the synthesizers compose: null checks, field
//! assignment, conditionals, blocks, and calls into the runtime guard.

use std::fmt;

use crate::Literal;

/// Index into the expression list of a [`BodyArena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

/// Index into the statement list of a [`BodyArena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct StmtId(u32);

impl StmtId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for StmtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StmtId({})", self.0)
    }
}

/// Call into one of the runtime guard routines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardCall {
    /// Prove `value` immutable at construction time, or fail.
    CheckImmutable {
        class: String,
        field: String,
        value: ExprId,
    },
    /// Reject keys of `args` that name no property of `instance`.
    CheckPropNames { instance: ExprId, args: ExprId },
}

/// Expression node.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Const(Literal),
    /// Constructor parameter or local.
    Var(String),
    This,
    /// Read of a field on `this`.
    Field(String),
    /// `map.key`; evaluates to null when the key is absent.
    Lookup { map: ExprId, key: String },
    ContainsKey { map: ExprId, key: String },
    Size(ExprId),
    Eq(ExprId, ExprId),
    IsNull(ExprId),
    /// Runtime test for the cloneable capability.
    IsCloneable(ExprId),
    Clone(ExprId),
    /// Wrap a collection or map in a read-only view.
    AsImmutable(ExprId),
    /// Fresh date built from the operand's epoch reading.
    CopyDate(ExprId),
    Conditional {
        cond: ExprId,
        then: ExprId,
        otherwise: ExprId,
    },
    /// Insertion-ordered map literal.
    MapLiteral(Vec<(String, ExprId)>),
    Guard(GuardCall),
}

/// Statement node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stmt {
    Empty,
    Expr(ExprId),
    /// `this.field = value`
    Assign { field: String, value: ExprId },
    If {
        cond: ExprId,
        then: StmtId,
        otherwise: StmtId,
    },
    Block(Vec<StmtId>),
    Return(ExprId),
    /// Raise the read-only-property error for `property` of `class`.
    ThrowReadOnly { property: String, class: String },
    /// Run the keyed constructor on `this` with the given map.
    DelegateKeyed(ExprId),
}

/// Arena owning every node of one class's synthesized bodies.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BodyArena {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
}

impl BodyArena {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId(self.exprs.len() as u32);
        self.exprs.push(expr);
        id
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId(self.stmts.len() as u32);
        self.stmts.push(stmt);
        id
    }

    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }

    // === Expression builders ===

    pub fn null(&mut self) -> ExprId {
        self.alloc_expr(Expr::Const(Literal::Null))
    }

    pub fn constant(&mut self, literal: Literal) -> ExprId {
        self.alloc_expr(Expr::Const(literal))
    }

    pub fn var(&mut self, name: impl Into<String>) -> ExprId {
        self.alloc_expr(Expr::Var(name.into()))
    }

    pub fn this(&mut self) -> ExprId {
        self.alloc_expr(Expr::This)
    }

    pub fn field(&mut self, name: impl Into<String>) -> ExprId {
        self.alloc_expr(Expr::Field(name.into()))
    }

    pub fn lookup(&mut self, map: ExprId, key: impl Into<String>) -> ExprId {
        self.alloc_expr(Expr::Lookup {
            map,
            key: key.into(),
        })
    }

    pub fn contains_key(&mut self, map: ExprId, key: impl Into<String>) -> ExprId {
        self.alloc_expr(Expr::ContainsKey {
            map,
            key: key.into(),
        })
    }

    pub fn size(&mut self, map: ExprId) -> ExprId {
        self.alloc_expr(Expr::Size(map))
    }

    pub fn eq(&mut self, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.alloc_expr(Expr::Eq(lhs, rhs))
    }

    pub fn is_null(&mut self, value: ExprId) -> ExprId {
        self.alloc_expr(Expr::IsNull(value))
    }

    pub fn is_cloneable(&mut self, value: ExprId) -> ExprId {
        self.alloc_expr(Expr::IsCloneable(value))
    }

    pub fn clone_of(&mut self, value: ExprId) -> ExprId {
        self.alloc_expr(Expr::Clone(value))
    }

    pub fn as_immutable(&mut self, value: ExprId) -> ExprId {
        self.alloc_expr(Expr::AsImmutable(value))
    }

    pub fn copy_date(&mut self, value: ExprId) -> ExprId {
        self.alloc_expr(Expr::CopyDate(value))
    }

    pub fn conditional(&mut self, cond: ExprId, then: ExprId, otherwise: ExprId) -> ExprId {
        self.alloc_expr(Expr::Conditional {
            cond,
            then,
            otherwise,
        })
    }

    /// `value == null ? null : expr`
    pub fn null_safe(&mut self, value: ExprId, expr: ExprId) -> ExprId {
        let cond = self.is_null(value);
        let null = self.null();
        self.conditional(cond, null, expr)
    }

    pub fn map_literal(&mut self, entries: Vec<(String, ExprId)>) -> ExprId {
        self.alloc_expr(Expr::MapLiteral(entries))
    }

    pub fn guard(&mut self, call: GuardCall) -> ExprId {
        self.alloc_expr(Expr::Guard(call))
    }

    // === Statement builders ===

    pub fn empty(&mut self) -> StmtId {
        self.alloc_stmt(Stmt::Empty)
    }

    pub fn expr_stmt(&mut self, expr: ExprId) -> StmtId {
        self.alloc_stmt(Stmt::Expr(expr))
    }

    pub fn assign(&mut self, field: impl Into<String>, value: ExprId) -> StmtId {
        self.alloc_stmt(Stmt::Assign {
            field: field.into(),
            value,
        })
    }

    pub fn if_else(&mut self, cond: ExprId, then: StmtId, otherwise: StmtId) -> StmtId {
        self.alloc_stmt(Stmt::If {
            cond,
            then,
            otherwise,
        })
    }

    pub fn block(&mut self, stmts: Vec<StmtId>) -> StmtId {
        self.alloc_stmt(Stmt::Block(stmts))
    }

    pub fn ret(&mut self, value: ExprId) -> StmtId {
        self.alloc_stmt(Stmt::Return(value))
    }

    pub fn throw_read_only(
        &mut self,
        property: impl Into<String>,
        class: impl Into<String>,
    ) -> StmtId {
        self.alloc_stmt(Stmt::ThrowReadOnly {
            property: property.into(),
            class: class.into(),
        })
    }

    pub fn delegate_keyed(&mut self, args: ExprId) -> StmtId {
        self.alloc_stmt(Stmt::DelegateKeyed(args))
    }

    /// Collect every guard call reachable from `root`, in evaluation order.
    pub fn guard_calls(&self, root: StmtId) -> Vec<&GuardCall> {
        let mut found = Vec::new();
        self.collect_stmt_guards(root, &mut found);
        found
    }

    fn collect_stmt_guards<'a>(&'a self, id: StmtId, found: &mut Vec<&'a GuardCall>) {
        match self.stmt(id) {
            Stmt::Empty | Stmt::ThrowReadOnly { .. } => {}
            Stmt::Expr(e) | Stmt::Return(e) | Stmt::DelegateKeyed(e) => {
                self.collect_expr_guards(*e, found);
            }
            Stmt::Assign { value, .. } => self.collect_expr_guards(*value, found),
            Stmt::If {
                cond,
                then,
                otherwise,
            } => {
                self.collect_expr_guards(*cond, found);
                self.collect_stmt_guards(*then, found);
                self.collect_stmt_guards(*otherwise, found);
            }
            Stmt::Block(stmts) => {
                for s in stmts {
                    self.collect_stmt_guards(*s, found);
                }
            }
        }
    }

    fn collect_expr_guards<'a>(&'a self, id: ExprId, found: &mut Vec<&'a GuardCall>) {
        match self.expr(id) {
            Expr::Const(_) | Expr::Var(_) | Expr::This | Expr::Field(_) => {}
            Expr::Lookup { map, .. } | Expr::ContainsKey { map, .. } => {
                self.collect_expr_guards(*map, found);
            }
            Expr::Size(e)
            | Expr::IsNull(e)
            | Expr::IsCloneable(e)
            | Expr::Clone(e)
            | Expr::AsImmutable(e)
            | Expr::CopyDate(e) => self.collect_expr_guards(*e, found),
            Expr::Eq(lhs, rhs) => {
                self.collect_expr_guards(*lhs, found);
                self.collect_expr_guards(*rhs, found);
            }
            Expr::Conditional {
                cond,
                then,
                otherwise,
            } => {
                self.collect_expr_guards(*cond, found);
                self.collect_expr_guards(*then, found);
                self.collect_expr_guards(*otherwise, found);
            }
            Expr::MapLiteral(entries) => {
                for (_, e) in entries {
                    self.collect_expr_guards(*e, found);
                }
            }
            Expr::Guard(call) => {
                match call {
                    GuardCall::CheckImmutable { value, .. } => {
                        self.collect_expr_guards(*value, found);
                    }
                    GuardCall::CheckPropNames { instance, args } => {
                        self.collect_expr_guards(*instance, found);
                        self.collect_expr_guards(*args, found);
                    }
                }
                found.push(call);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn ids_are_dense() {
        let mut arena = BodyArena::new();
        let a = arena.null();
        let b = arena.var("args");
        let s = arena.empty();

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(s.index(), 0);
        assert_eq!(arena.expr(b), &Expr::Var("args".into()));
        assert_eq!(arena.expr_count(), 2);
        assert_eq!(arena.stmt_count(), 1);
    }

    #[test]
    fn null_safe_shape() {
        let mut arena = BodyArena::new();
        let field = arena.field("tags");
        let cloned = arena.clone_of(field);
        let safe = arena.null_safe(field, cloned);

        let Expr::Conditional { cond, then, otherwise } = arena.expr(safe) else {
            panic!("expected conditional");
        };
        assert_eq!(arena.expr(*cond), &Expr::IsNull(field));
        assert_eq!(arena.expr(*then), &Expr::Const(Literal::Null));
        assert_eq!(*otherwise, cloned);
    }

    #[test]
    fn guard_calls_in_order() {
        let mut arena = BodyArena::new();
        let args = arena.var("args");
        let value = arena.lookup(args, "item");
        let check = arena.guard(GuardCall::CheckImmutable {
            class: "Box".into(),
            field: "item".into(),
            value,
        });
        let assign = arena.assign("item", check);
        let this = arena.this();
        let names = arena.guard(GuardCall::CheckPropNames {
            instance: this,
            args,
        });
        let names_stmt = arena.expr_stmt(names);
        let body = arena.block(vec![assign, names_stmt]);

        let calls = arena.guard_calls(body);
        assert_eq!(calls.len(), 2);
        assert!(matches!(calls[0], GuardCall::CheckImmutable { field, .. } if field == "item"));
        assert!(matches!(calls[1], GuardCall::CheckPropNames { .. }));
    }
}
