//! 计划节点参数中使用的表达式
//!
//! 优化器只需要识别列引用与边表达式，其余表达式作为不透明的过滤条件原样传递。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 字面量
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    String(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => write!(f, "NULL"),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Int(i) => write!(f, "{}", i),
            Literal::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

/// 二元运算符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    And,
    Or,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::LessThan => "<",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
        };
        write!(f, "{}", op)
    }
}

/// 表达式
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expression {
    /// 字面量
    Literal(Literal),
    /// 输入流中的列：`$-.col`
    InputProperty(String),
    /// 具名变量中的列：`$var.col`
    VariableProperty { var: String, prop: String },
    /// 当前行的边：`EDGE`
    Edge,
    /// 当前行的顶点：`VERTEX`
    Vertex,
    /// 边属性：`edge.prop`
    EdgeProperty { edge: String, prop: String },
    /// 列表：`[a, b]`
    List(Vec<Expression>),
    /// 函数调用
    Function { name: String, args: Vec<Expression> },
    /// 二元运算
    Binary {
        op: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
}

impl Expression {
    pub fn input_property(col: &str) -> Self {
        Expression::InputProperty(col.to_string())
    }

    pub fn variable_property(var: &str, prop: &str) -> Self {
        Expression::VariableProperty {
            var: var.to_string(),
            prop: prop.to_string(),
        }
    }

    pub fn binary(op: BinaryOperator, left: Expression, right: Expression) -> Self {
        Expression::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// 如果表达式是对某一列的直接引用，返回列名
    pub fn column_ref(&self) -> Option<&str> {
        match self {
            Expression::InputProperty(col) => Some(col),
            Expression::VariableProperty { prop, .. } => Some(prop),
            _ => None,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(lit) => write!(f, "{}", lit),
            Expression::InputProperty(col) => write!(f, "$-.{}", col),
            Expression::VariableProperty { var, prop } => write!(f, "${}.{}", var, prop),
            Expression::Edge => write!(f, "EDGE"),
            Expression::Vertex => write!(f, "VERTEX"),
            Expression::EdgeProperty { edge, prop } => write!(f, "{}.{}", edge, prop),
            Expression::List(items) => {
                let items: Vec<String> = items.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", items.join(","))
            }
            Expression::Function { name, args } => {
                let args: Vec<String> = args.iter().map(|e| e.to_string()).collect();
                write!(f, "{}({})", name, args.join(","))
            }
            Expression::Binary { op, left, right } => write!(f, "({}{}{})", left, op, right),
        }
    }
}

/// 投影列
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YieldColumn {
    pub expr: Expression,
    pub alias: String,
}

impl YieldColumn {
    pub fn new(expr: Expression, alias: impl Into<String>) -> Self {
        Self {
            expr,
            alias: alias.into(),
        }
    }

    /// 列名，无别名时使用表达式文本
    pub fn name(&self) -> String {
        if self.alias.is_empty() {
            self.expr.to_string()
        } else {
            self.alias.clone()
        }
    }
}

impl fmt::Display for YieldColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alias.is_empty() {
            write!(f, "{}", self.expr)
        } else {
            write!(f, "{} AS {}", self.expr, self.alias)
        }
    }
}
