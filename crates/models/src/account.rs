use sea_orm::{entity::prelude::*, ActiveValue::NotSet, DatabaseConnection, QueryOrder, Set};
use serde_json::{Map, Value};

use crate::errors::ModelError;

pub const NAME_MAX_LEN: usize = 64;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "account")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub attributes: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// JSON view of the row: `id`, `name` and every attribute at top level.
    pub fn serialize(&self) -> Value {
        let mut out = Map::new();
        out.insert("id".into(), Value::from(self.id));
        out.insert("name".into(), Value::from(self.name.clone()));
        if let Value::Object(attrs) = &self.attributes {
            for (k, v) in attrs {
                out.entry(k.clone()).or_insert_with(|| v.clone());
            }
        }
        Value::Object(out)
    }

    pub fn fields(&self) -> AccountFields {
        let attributes = match &self.attributes {
            Value::Object(m) => m.clone(),
            _ => Map::new(),
        };
        AccountFields { name: self.name.clone(), attributes }
    }
}

/// Validated business fields of an account, everything except the id.
#[derive(Clone, Debug, PartialEq)]
pub struct AccountFields {
    pub name: String,
    pub attributes: Map<String, Value>,
}

impl AccountFields {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), attributes: Map::new() }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Build fields from a request body. A client supplied `id` is ignored.
    pub fn deserialize(payload: &Value) -> Result<Self, ModelError> {
        let obj = payload.as_object().ok_or_else(|| {
            invalid("body of request contained bad or no data")
        })?;

        let name = match obj.get("name") {
            None | Some(Value::Null) => return Err(invalid("missing name")),
            Some(Value::String(s)) => s.clone(),
            Some(_) => return Err(invalid("name must be a string")),
        };
        validate_name(&name)?;

        let mut attributes = Map::new();
        for (key, value) in obj {
            if key == "id" || key == "name" {
                continue;
            }
            if key.trim().is_empty() {
                return Err(invalid("attribute names must not be blank"));
            }
            if value.is_array() || value.is_object() {
                return Err(invalid(&format!("attribute {key} must be a scalar value")));
            }
            attributes.insert(key.clone(), value.clone());
        }

        Ok(Self { name, attributes })
    }
}

fn invalid(reason: &str) -> ModelError {
    ModelError::Validation(format!("Invalid Account: {reason}"))
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(invalid("name must not be blank"));
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(invalid(&format!("name must be at most {NAME_MAX_LEN} characters")));
    }
    Ok(())
}

/// Insert a new row; the store assigns the id.
pub async fn create(db: &DatabaseConnection, fields: AccountFields) -> Result<Model, ModelError> {
    validate_name(&fields.name)?;
    let am = ActiveModel {
        id: NotSet,
        name: Set(fields.name),
        attributes: Set(Value::Object(fields.attributes)),
    };
    Ok(am.insert(db).await?)
}

/// Overwrite the fields of an existing row. Never inserts; a missing row,
/// including one removed concurrently, is `NotFound`.
pub async fn update(db: &DatabaseConnection, id: i32, fields: AccountFields) -> Result<Model, ModelError> {
    validate_name(&fields.name)?;
    let am = ActiveModel {
        id: Set(id),
        name: Set(fields.name),
        attributes: Set(Value::Object(fields.attributes)),
    };
    match am.update(db).await {
        Ok(m) => Ok(m),
        Err(DbErr::RecordNotUpdated) => Err(ModelError::NotFound(id)),
        Err(e) => Err(e.into()),
    }
}

/// Remove the row if present. Returns whether a row was deleted.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

pub async fn find(db: &DatabaseConnection, id: i32) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

/// All rows in id order.
pub async fn all(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().order_by_asc(Column::Id).all(db).await?)
}

pub async fn count(db: &DatabaseConnection) -> Result<u64, ModelError> {
    use sea_orm::PaginatorTrait;
    Ok(Entity::find().count(db).await?)
}
