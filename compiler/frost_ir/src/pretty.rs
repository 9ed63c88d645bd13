//! Pretty-printer for synthesized members.
//!
//! Renders bodies in a Groovy-like surface syntax. Used by the CLI to show
//! what the transform produced and by tests to pin body shapes as text.

use std::fmt::Write;

use crate::{
    BodyArena, ConstructorKind, Expr, ExprId, GuardCall, Modifiers, Stmt, StmtId,
    SynthesizedMember, TypePool,
};

/// Spaces per indentation level.
pub const INDENT_WIDTH: usize = 4;

/// Render modifiers in declaration order: visibility, `static`, `final`.
pub fn modifiers_prefix(modifiers: Modifiers) -> String {
    let mut words = Vec::new();
    if modifiers.contains(Modifiers::PUBLIC) {
        words.push("public");
    }
    if modifiers.contains(Modifiers::PROTECTED) {
        words.push("protected");
    }
    if modifiers.contains(Modifiers::PRIVATE) {
        words.push("private");
    }
    if modifiers.contains(Modifiers::STATIC) {
        words.push("static");
    }
    if modifiers.contains(Modifiers::FINAL) {
        words.push("final");
    }
    words.join(" ")
}

/// Printer over one class's body arena.
pub struct BodyPrinter<'a> {
    arena: &'a BodyArena,
    pool: &'a TypePool,
    out: String,
    indent: usize,
}

impl<'a> BodyPrinter<'a> {
    pub fn new(arena: &'a BodyArena, pool: &'a TypePool) -> Self {
        BodyPrinter {
            arena,
            pool,
            out: String::new(),
            indent: 0,
        }
    }

    /// Render a full member declaration; `class_name` is the short class name.
    pub fn member(mut self, class_name: &str, member: &SynthesizedMember) -> String {
        match member {
            SynthesizedMember::Field(field) => {
                let prefix = modifiers_prefix(field.modifiers);
                let ty = self.pool.name(field.ty);
                if prefix.is_empty() {
                    self.line(&format!("{ty} {}", field.name));
                } else {
                    self.line(&format!("{prefix} {ty} {}", field.name));
                }
            }
            SynthesizedMember::Constructor(ctor) => {
                let params = ctor
                    .params
                    .iter()
                    .map(|p| format!("{} {}", self.pool.name(p.ty), p.name))
                    .collect::<Vec<_>>()
                    .join(", ");
                let tag = match ctor.kind {
                    ConstructorKind::Keyed => "keyed",
                    ConstructorKind::Positional => "positional",
                };
                self.line(&format!("// {tag}"));
                self.line(&format!("public {class_name}({params}) {{"));
                self.nested(ctor.body);
                self.line("}");
            }
            SynthesizedMember::Getter(getter) => {
                let ty = self.pool.name(getter.ty);
                self.line(&format!("public final {ty} {}() {{", getter.method_name));
                self.nested(getter.body);
                self.line("}");
            }
        }
        self.out
    }

    /// Render a bare statement tree.
    pub fn stmt(mut self, id: StmtId) -> String {
        self.write_stmt(id);
        self.out
    }

    /// Render a single expression.
    pub fn expr(&self, id: ExprId) -> String {
        self.render_expr(id, false)
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indent * INDENT_WIDTH {
            self.out.push(' ');
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn nested(&mut self, id: StmtId) {
        self.indent += 1;
        self.write_stmt(id);
        self.indent -= 1;
    }

    fn write_stmt(&mut self, id: StmtId) {
        match self.arena.stmt(id) {
            Stmt::Empty => {}
            Stmt::Expr(e) => {
                let text = self.expr(*e);
                self.line(&text);
            }
            Stmt::Assign { field, value } => {
                let text = format!("this.{field} = {}", self.expr(*value));
                self.line(&text);
            }
            Stmt::If {
                cond,
                then,
                otherwise,
            } => {
                let text = format!("if ({}) {{", self.expr(*cond));
                self.line(&text);
                self.write_else_chain(*then, *otherwise);
            }
            Stmt::Block(stmts) => {
                for s in stmts {
                    self.write_stmt(*s);
                }
            }
            Stmt::Return(e) => {
                let text = format!("return {}", self.expr(*e));
                self.line(&text);
            }
            Stmt::ThrowReadOnly { property, class } => {
                self.line(&format!(
                    "throw new ReadOnlyPropertyException({property:?}, {class:?})"
                ));
            }
            Stmt::DelegateKeyed(args) => {
                let text = format!("this({})", self.expr(*args));
                self.line(&text);
            }
        }
    }

    /// Body of an `if` plus any `else if` / `else` continuation.
    fn write_else_chain(&mut self, then: StmtId, otherwise: StmtId) {
        self.nested(then);
        match self.arena.stmt(otherwise) {
            Stmt::Empty => self.line("}"),
            Stmt::If {
                cond,
                then,
                otherwise,
            } => {
                let text = format!("}} else if ({}) {{", self.expr(*cond));
                self.line(&text);
                self.write_else_chain(*then, *otherwise);
            }
            _ => {
                self.line("} else {");
                self.nested(otherwise);
                self.line("}");
            }
        }
    }

    fn render_expr(&self, id: ExprId, operand: bool) -> String {
        match self.arena.expr(id) {
            Expr::Const(lit) => lit.to_string(),
            Expr::Var(name) => name.clone(),
            Expr::This => "this".to_owned(),
            Expr::Field(name) => format!("this.{name}"),
            Expr::Lookup { map, key } => format!("{}.{key}", self.render_expr(*map, true)),
            Expr::ContainsKey { map, key } => {
                format!("{}.containsKey({key:?})", self.render_expr(*map, true))
            }
            Expr::Size(e) => format!("{}.size()", self.render_expr(*e, true)),
            Expr::Eq(lhs, rhs) => {
                let text = format!(
                    "{} == {}",
                    self.render_expr(*lhs, true),
                    self.render_expr(*rhs, true)
                );
                if operand {
                    format!("({text})")
                } else {
                    text
                }
            }
            Expr::IsNull(e) => {
                let text = format!("{} == null", self.render_expr(*e, true));
                if operand {
                    format!("({text})")
                } else {
                    text
                }
            }
            Expr::IsCloneable(e) => {
                let text = format!("{} instanceof Cloneable", self.render_expr(*e, true));
                if operand {
                    format!("({text})")
                } else {
                    text
                }
            }
            Expr::Clone(e) => format!("{}.clone()", self.render_expr(*e, true)),
            Expr::AsImmutable(e) => format!("asImmutable({})", self.render_expr(*e, false)),
            Expr::CopyDate(e) => format!("new Date({}.time)", self.render_expr(*e, true)),
            Expr::Conditional {
                cond,
                then,
                otherwise,
            } => {
                let text = format!(
                    "{} ? {} : {}",
                    self.render_expr(*cond, false),
                    self.render_expr(*then, true),
                    self.render_expr(*otherwise, true)
                );
                if operand {
                    format!("({text})")
                } else {
                    text
                }
            }
            Expr::MapLiteral(entries) => {
                if entries.is_empty() {
                    return "[:]".to_owned();
                }
                let mut text = String::from("[");
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        text.push_str(", ");
                    }
                    let _ = write!(text, "{key}: {}", self.render_expr(*value, false));
                }
                text.push(']');
                text
            }
            Expr::Guard(GuardCall::CheckImmutable {
                class,
                field,
                value,
            }) => format!(
                "RuntimeGuard.checkImmutable({class:?}, {field:?}, {})",
                self.render_expr(*value, false)
            ),
            Expr::Guard(GuardCall::CheckPropNames { instance, args }) => format!(
                "RuntimeGuard.checkPropNames({}, {})",
                self.render_expr(*instance, false),
                self.render_expr(*args, false)
            ),
        }
    }
}
