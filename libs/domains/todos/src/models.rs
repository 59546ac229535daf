use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

pub const TITLE_MAX_LEN: usize = 200;
pub const DESCRIPTION_MAX_LEN: usize = 1000;
pub const CATEGORY_MAX_LEN: usize = 50;
pub const DEFAULT_CATEGORY: &str = "general";
pub const DEFAULT_LIMIT: u64 = 50;
pub const MAX_LIMIT: u64 = 1000;

/// Todo priority
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TodoPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// Todo entity
#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub priority: TodoPriority,
    pub category: String,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Current time at the millisecond precision the document store keeps.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

impl Todo {
    /// Create a new todo from validated fields
    pub fn new(fields: TodoFields) -> Self {
        let now = now_millis();
        Self {
            id: Uuid::now_v7(),
            title: fields.title,
            description: fields.description.unwrap_or_default(),
            completed: false,
            priority: fields.priority.unwrap_or_default(),
            category: fields
                .category
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            due_date: fields.due_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a full update.
    ///
    /// Omitted description, priority, category and completed keep their
    /// stored values; an omitted due date clears it.
    pub fn apply_update(&mut self, fields: TodoFields, completed: Option<bool>) {
        self.title = fields.title;
        if let Some(description) = fields.description {
            self.description = description;
        }
        if let Some(priority) = fields.priority {
            self.priority = priority;
        }
        if let Some(category) = fields.category {
            self.category = category;
        }
        if let Some(completed) = completed {
            self.completed = completed;
        }
        self.due_date = fields.due_date;
        self.touch();
    }

    pub fn toggle(&mut self) {
        self.completed = !self.completed;
        self.touch();
    }

    /// Incomplete with a due date strictly before `now`.
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < now)
    }

    fn touch(&mut self) {
        // updatedAt never precedes createdAt, even if the wall clock steps back
        self.updated_at = now_millis().max(self.created_at);
    }
}

/// Todo as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[schema(example = "Buy milk")]
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub priority: TodoPriority,
    #[schema(example = "general")]
    pub category: String,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Derived: due date has passed and the todo is not completed
    pub is_overdue: bool,
}

impl TodoResponse {
    pub fn at(todo: Todo, now: DateTime<Utc>) -> Self {
        let is_overdue = todo.is_overdue_at(now);
        Self {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            completed: todo.completed,
            priority: todo.priority,
            category: todo.category,
            due_date: todo.due_date,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
            is_overdue,
        }
    }
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self::at(todo, Utc::now())
    }
}

/// A request body field that tolerates the wrong JSON type.
///
/// `null` counts as absent. A value of the wrong type is kept as
/// [`JsonField::WrongType`] so it can be reported as a field violation
/// together with the others instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum JsonField<T> {
    #[default]
    Absent,
    Value(T),
    WrongType,
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for JsonField<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Null => JsonField::Absent,
            value => serde_json::from_value(value).map_or(JsonField::WrongType, JsonField::Value),
        })
    }
}

impl<T> JsonField<T> {
    /// The value if present; records `message` against `field` on a type mismatch.
    fn or_violation(
        self,
        errors: &mut ValidationErrors,
        field: &'static str,
        message: &'static str,
    ) -> Option<T> {
        match self {
            JsonField::Absent => None,
            JsonField::Value(value) => Some(value),
            JsonField::WrongType => {
                errors.add(field, violation("type", message));
                None
            }
        }
    }
}

/// DTO for creating a new todo
///
/// Text fields are trimmed during validation. Priority and due date arrive
/// as raw strings so that bad values surface as field violations alongside
/// the others.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    #[serde(default)]
    #[schema(value_type = String, example = "Buy milk")]
    pub title: JsonField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub description: JsonField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "high")]
    pub priority: JsonField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "shopping")]
    pub category: JsonField<String>,
    /// ISO 8601 date or date-time
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "2026-01-31")]
    pub due_date: JsonField<String>,
}

/// DTO for a full update of an existing todo
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodo {
    #[serde(default)]
    #[schema(value_type = String)]
    pub title: JsonField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub description: JsonField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub priority: JsonField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub category: JsonField<String>,
    /// Omitting the due date clears it
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub due_date: JsonField<String>,
    #[serde(default)]
    #[schema(value_type = Option<bool>)]
    pub completed: JsonField<bool>,
}

/// Validated, normalized todo fields shared by create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoFields {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<TodoPriority>,
    /// Blank input is already replaced by the default category
    pub category: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

impl CreateTodo {
    pub fn into_fields(self) -> Result<TodoFields, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let fields = check_fields(
            self.title,
            self.description,
            self.priority,
            self.category,
            self.due_date,
            &mut errors,
        );
        finish(errors, fields)
    }
}

impl UpdateTodo {
    pub fn into_fields(self) -> Result<(TodoFields, Option<bool>), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let fields = check_fields(
            self.title,
            self.description,
            self.priority,
            self.category,
            self.due_date,
            &mut errors,
        );
        let completed = self.completed.or_violation(
            &mut errors,
            "completed",
            "completed must be true or false",
        );
        finish(errors, (fields, completed))
    }
}

fn violation(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

fn finish<T>(errors: ValidationErrors, value: T) -> Result<T, ValidationErrors> {
    if errors.errors().is_empty() {
        Ok(value)
    } else {
        Err(errors)
    }
}

fn trimmed(
    value: JsonField<String>,
    errors: &mut ValidationErrors,
    field: &'static str,
    message: &'static str,
) -> Option<String> {
    value
        .or_violation(errors, field, message)
        .map(|s| s.trim().to_string())
}

/// Collects every field violation rather than stopping at the first.
///
/// The returned fields are only meaningful when `errors` stays empty.
fn check_fields(
    title: JsonField<String>,
    description: JsonField<String>,
    priority: JsonField<String>,
    category: JsonField<String>,
    due_date: JsonField<String>,
    errors: &mut ValidationErrors,
) -> TodoFields {
    let title_is_text = !matches!(title, JsonField::WrongType);
    let title = trimmed(title, errors, "title", "Title must be a string").unwrap_or_default();
    if title_is_text && title.is_empty() {
        errors.add("title", violation("required", "Title is required"));
    } else if title.chars().count() > TITLE_MAX_LEN {
        errors.add(
            "title",
            violation(
                "length",
                format!("Title must be {} characters or less", TITLE_MAX_LEN),
            ),
        );
    }

    let description = trimmed(
        description,
        errors,
        "description",
        "Description must be a string",
    );
    if description
        .as_ref()
        .is_some_and(|d| d.chars().count() > DESCRIPTION_MAX_LEN)
    {
        errors.add(
            "description",
            violation(
                "length",
                format!(
                    "Description must be {} characters or less",
                    DESCRIPTION_MAX_LEN
                ),
            ),
        );
    }

    const PRIORITY_MESSAGE: &str = "Priority must be low, medium, or high";
    let priority = match trimmed(priority, errors, "priority", PRIORITY_MESSAGE) {
        None => None,
        Some(raw) => match TodoPriority::from_str(&raw) {
            Ok(p) => Some(p),
            Err(_) => {
                errors.add("priority", violation("enum", PRIORITY_MESSAGE));
                None
            }
        },
    };

    let category = trimmed(category, errors, "category", "Category must be a string").map(|c| {
        if c.is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            c
        }
    });
    if category
        .as_ref()
        .is_some_and(|c| c.chars().count() > CATEGORY_MAX_LEN)
    {
        errors.add(
            "category",
            violation(
                "length",
                format!("Category must be {} characters or less", CATEGORY_MAX_LEN),
            ),
        );
    }

    const DUE_DATE_MESSAGE: &str = "Due date must be a valid ISO 8601 date";
    let due_date = match trimmed(due_date, errors, "dueDate", DUE_DATE_MESSAGE).as_deref() {
        None | Some("") => None,
        Some(raw) => match parse_due_date(raw) {
            Some(date) => Some(date),
            None => {
                errors.add("dueDate", violation("date", DUE_DATE_MESSAGE));
                None
            }
        },
    };

    TodoFields {
        title,
        description,
        priority,
        category,
        due_date,
    }
}

/// Accepts RFC 3339 date-times, zone-less date-times (read as UTC) and
/// plain `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_due_date(raw: &str) -> Option<DateTime<Utc>> {
    let parsed = if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        dt.with_timezone(&Utc)
    } else if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        naive.and_utc()
    } else {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()?
            .and_hms_opt(0, 0, 0)?
            .and_utc()
    };
    Some(parsed.trunc_subsecs(3))
}

/// Field a todo list can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum SortField {
    Title,
    Description,
    Completed,
    Priority,
    Category,
    DueDate,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// Stored document field name
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Description => "description",
            SortField::Completed => "completed",
            SortField::Priority => "priority",
            SortField::Category => "category",
            SortField::DueDate => "dueDate",
            SortField::CreatedAt => "createdAt",
            SortField::UpdatedAt => "updatedAt",
        }
    }

    /// Ascending comparison of two todos on this field.
    ///
    /// Priority compares by its stored string, absent due dates sort first.
    pub fn compare(&self, a: &Todo, b: &Todo) -> Ordering {
        match self {
            SortField::Title => a.title.cmp(&b.title),
            SortField::Description => a.description.cmp(&b.description),
            SortField::Completed => a.completed.cmp(&b.completed),
            SortField::Priority => a.priority.to_string().cmp(&b.priority.to_string()),
            SortField::Category => a.category.cmp(&b.category),
            SortField::DueDate => a.due_date.cmp(&b.due_date),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// `asc` (any case) is ascending; every other value is descending.
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("asc") {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }

    pub fn direction(&self) -> i32 {
        match self {
            SortOrder::Asc => 1,
            SortOrder::Desc => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TodoSort {
    pub field: SortField,
    pub order: SortOrder,
}

/// Filter criteria for listing, counting and bulk deletion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    pub completed: Option<bool>,
    pub priority: Option<TodoPriority>,
    /// Case-insensitive substring of the category
    pub category: Option<String>,
}

impl TodoFilter {
    pub fn completed() -> Self {
        Self {
            completed: Some(true),
            ..Default::default()
        }
    }

    pub fn matches(&self, todo: &Todo) -> bool {
        if self.completed.is_some_and(|c| c != todo.completed) {
            return false;
        }
        if self.priority.is_some_and(|p| p != todo.priority) {
            return false;
        }
        if let Some(ref needle) = self.category {
            if !todo
                .category
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}

/// A validated list request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoQuery {
    pub filter: TodoFilter,
    pub sort: TodoSort,
    pub limit: u64,
    pub skip: u64,
}

impl Default for TodoQuery {
    fn default() -> Self {
        Self {
            filter: TodoFilter::default(),
            sort: TodoSort::default(),
            limit: DEFAULT_LIMIT,
            skip: 0,
        }
    }
}

/// Raw query string of `GET /todos`; blank values count as absent
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListTodosParams {
    /// `true` or `false`
    pub completed: Option<String>,
    /// `low`, `medium` or `high`
    pub priority: Option<String>,
    /// Case-insensitive substring match
    pub category: Option<String>,
    /// Any todo field, default `createdAt`
    pub sort_by: Option<String>,
    /// `asc` or `desc` (default)
    pub sort_order: Option<String>,
    /// 1 to 1000, default 50
    pub limit: Option<String>,
    /// Default 0
    pub skip: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ListTodosParams {
    /// Validates every parameter, reporting all violations together.
    pub fn parse(&self) -> Result<TodoQuery, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut query = TodoQuery::default();

        if let Some(raw) = present(&self.completed) {
            match raw {
                "true" => query.filter.completed = Some(true),
                "false" => query.filter.completed = Some(false),
                _ => errors.add(
                    "completed",
                    violation("boolean", "completed must be true or false"),
                ),
            }
        }

        if let Some(raw) = present(&self.priority) {
            match TodoPriority::from_str(raw) {
                Ok(p) => query.filter.priority = Some(p),
                Err(_) => errors.add(
                    "priority",
                    violation("enum", "Priority must be low, medium, or high"),
                ),
            }
        }

        query.filter.category = present(&self.category).map(str::to_string);

        if let Some(raw) = present(&self.sort_by) {
            match SortField::from_str(raw) {
                Ok(field) => query.sort.field = field,
                Err(_) => errors.add(
                    "sortBy",
                    violation(
                        "enum",
                        "sortBy must be one of title, description, completed, priority, \
                         category, dueDate, createdAt, updatedAt",
                    ),
                ),
            }
        }

        if let Some(raw) = present(&self.sort_order) {
            query.sort.order = SortOrder::parse(raw);
        }

        if let Some(raw) = present(&self.limit) {
            match raw.parse::<u64>() {
                Ok(n) if (1..=MAX_LIMIT).contains(&n) => query.limit = n,
                _ => errors.add(
                    "limit",
                    violation(
                        "range",
                        format!("limit must be an integer between 1 and {}", MAX_LIMIT),
                    ),
                ),
            }
        }

        if let Some(raw) = present(&self.skip) {
            // the document store encodes skip as a signed 64-bit integer
            match raw.parse::<u64>() {
                Ok(n) if n <= i64::MAX as u64 => query.skip = n,
                _ => errors.add(
                    "skip",
                    violation("range", "skip must be a non-negative integer"),
                ),
            }
        }

        if errors.errors().is_empty() {
            Ok(query)
        } else {
            Err(errors)
        }
    }
}

/// One page of a list request
#[derive(Debug, Clone)]
pub struct TodoPage {
    pub items: Vec<Todo>,
    /// Todos matching the filter, ignoring limit and skip
    pub total: u64,
    pub limit: u64,
    pub skip: u64,
}

/// Aggregate counts over all todos
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoStats {
    pub total: u64,
    pub completed: u64,
    pub pending: u64,
    pub high_priority: u64,
    pub medium_priority: u64,
    pub low_priority: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedCount {
    pub deleted_count: u64,
}
