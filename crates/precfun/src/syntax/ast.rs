use crate::relation::Relation;

#[derive(Debug)]
pub struct Table {
    pub stmts: Vec<Stmt>,
}

#[derive(Debug)]
pub enum Stmt {
    GroupDesc(GroupDesc),
    EndDesc(EndDesc),
    ColumnsDesc(ColumnsDesc),
    RowDesc(RowDesc),
    OrderDesc(OrderDesc),
}

#[derive(Debug)]
pub struct GroupDesc {
    pub label: String,
    pub members: Vec<String>,
}

#[derive(Debug)]
pub struct EndDesc {
    pub label: String,
}

#[derive(Debug)]
pub struct ColumnsDesc {
    pub labels: Vec<String>,
}

#[derive(Debug)]
pub struct RowDesc {
    pub label: String,
    pub cells: Vec<Relation>,
}

#[derive(Debug)]
pub struct OrderDesc {
    pub labels: Vec<String>,
}
