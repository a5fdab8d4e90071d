use std::cmp;
use std::collections::{BTreeSet, HashMap};
use std::time::Duration;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::{Credentials, Region};
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::builders::QueryFluentBuilder;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::types::{AttributeDefinition, AttributeValue, GlobalSecondaryIndex, KeySchemaElement, KeyType, Projection, ProjectionType, ProvisionedThroughput, ScalarAttributeType, TableStatus};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Number, Value};
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::RepositoryStore;
use crate::utils::date::format_date_time;
use crate::utils::memory::split_predicate_key;

const LOCAL_ENDPOINT: &str = "http://localhost:8000";

// A global secondary index; range_key gives the listing order within hash_key.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TableIndex<'a> {
    pub name: &'a str,
    pub hash_key: &'a str,
    pub range_key: &'a str,
}

pub(crate) async fn create_table(client: &Client,
                                 table_name: &str, pk: &str,
                                 indexes: &[TableIndex<'_>]) -> LibraryResult<()> {
    let mut attributes = BTreeSet::from([pk]);
    let mut request = client
        .create_table()
        .table_name(table_name)
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name(pk)
                .key_type(KeyType::Hash)
                .build(),
        )
        .provisioned_throughput(
            ProvisionedThroughput::builder()
                .read_capacity_units(10)
                .write_capacity_units(10)
                .build(),
        );
    for index in indexes {
        attributes.insert(index.hash_key);
        attributes.insert(index.range_key);
        let gsi = GlobalSecondaryIndex::builder()
            .index_name(index.name)
            .key_schema(KeySchemaElement::builder()
                .attribute_name(index.hash_key)
                .key_type(KeyType::Hash).build())
            .key_schema(KeySchemaElement::builder()
                .attribute_name(index.range_key)
                .key_type(KeyType::Range).build())
            .projection(Projection::builder().projection_type(ProjectionType::All).build())
            .provisioned_throughput(
                ProvisionedThroughput::builder().read_capacity_units(10).write_capacity_units(10).build())
            .build();
        request = request.global_secondary_indexes(gsi);
    }
    for attribute in attributes {
        request = request.attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name(attribute)
                .attribute_type(ScalarAttributeType::S)
                .build(),
        );
    }

    match request.send().await {
        Ok(_k) => {
            wait_until_table_status_is_not(client, table_name, TableStatus::Creating).await;
            Ok(())
        }
        Err(err) => {
            Err(LibraryError::database_or_unavailable(format!("failed to create {} table due to {}",
                                                              table_name, err).as_str(), None, false))
        }
    }
}

pub(crate) async fn delete_table(client: &Client, table_name: &str) -> LibraryResult<()> {
    match client.delete_table().table_name(table_name).send().await {
        Ok(_k) => {
            wait_until_table_status_is_not(client, table_name, TableStatus::Deleting).await;
            Ok(())
        }
        Err(err) => {
            Err(LibraryError::database_or_unavailable(format!("failed to delete {} table due to {}",
                                                              table_name, err).as_str(), None, false))
        }
    }
}

async fn wait_until_table_status_is_not(client: &Client, table_name: &str, other_status: TableStatus) {
    for _i in 0..30 {
        if let Ok(status) = describe_table(client, table_name).await {
            if status != other_status {
                return;
            }
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}

async fn describe_table(client: &Client, table_name: &str) -> LibraryResult<TableStatus> {
    match client
        .describe_table()
        .table_name(table_name)
        .send()
        .await
    {
        Ok(out) => {
            if let Some(table) = out.table() {
                if let Some(status) = table.table_status() {
                    return Ok(status.clone());
                }
            }
            Err(LibraryError::runtime(format!("failed to describe {} table",
                                              table_name).as_str(), None))
        }
        Err(err) => {
            Err(LibraryError::database_or_unavailable(format!("failed to describe {} table due to {}",
                                                              table_name, err).as_str(), None, false))
        }
    }
}

// DDBTable wraps one table keyed by a string hash key; entities travel as serde values.
#[derive(Debug, Clone)]
pub(crate) struct DDBTable {
    client: Client,
    table_name: String,
    key_name: String,
}

impl DDBTable {
    pub(crate) fn new(client: Client, table_name: &str, key_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            key_name: key_name.to_string(),
        }
    }

    pub(crate) async fn put_new<T: Serialize + Identifiable>(&self, entity: &T) -> LibraryResult<usize> {
        let val = serde_json::to_value(entity)?;
        match self.client
            .put_item()
            .table_name(self.table_name.as_str())
            .condition_expression("attribute_not_exists(#key)")
            .expression_attribute_names("#key", self.key_name.as_str())
            .set_item(Some(parse_item(val)?))
            .send()
            .await {
            Ok(_) => Ok(1),
            Err(SdkError::ServiceError(ctx)) if ctx.err().is_conditional_check_failed_exception() => {
                Err(LibraryError::duplicate_key(
                    format!("{} {} already exists", self.key_name, entity.id()).as_str()))
            }
            Err(err) => Err(LibraryError::from(err)),
        }
    }

    // replaces the item only when the stored version matches the entity's
    pub(crate) async fn put_versioned<T: Serialize + Identifiable>(&self, entity: &T) -> LibraryResult<usize> {
        let mut val = serde_json::to_value(entity)?;
        if let Value::Object(map) = &mut val {
            map.insert("version".to_string(), Value::from(entity.version() + 1));
            map.insert("updated_at".to_string(), Value::String(format_date_time(&Utc::now().naive_utc())));
        }
        match self.client
            .put_item()
            .table_name(self.table_name.as_str())
            .condition_expression("attribute_exists(#key) AND #version = :old_version")
            .expression_attribute_names("#key", self.key_name.as_str())
            .expression_attribute_names("#version", "version")
            .expression_attribute_values(":old_version", AttributeValue::N(entity.version().to_string()))
            .set_item(Some(parse_item(val)?))
            .send()
            .await {
            Ok(_) => Ok(1),
            Err(SdkError::ServiceError(ctx)) if ctx.err().is_conditional_check_failed_exception() => {
                Err(LibraryError::database(
                    format!("stale version {} or missing {} {}", entity.version(), self.key_name, entity.id()).as_str(),
                    Some("409".to_string()), false))
            }
            Err(err) => Err(LibraryError::from(err)),
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, id: &str) -> LibraryResult<T> {
        let out = self.client
            .query()
            .table_name(self.table_name.as_str())
            .limit(2)
            .consistent_read(true)
            .key_condition_expression("#key = :key")
            .expression_attribute_names("#key", self.key_name.as_str())
            .expression_attribute_values(":key", AttributeValue::S(id.to_string()))
            .send()
            .await?;
        match out.items() {
            Some(items) if items.len() > 1 => {
                Err(LibraryError::database(format!("too many {} for {}", self.table_name, id).as_str(), None, false))
            }
            Some(items) => match items.first() {
                Some(map) => parse_entity(map),
                None => Err(LibraryError::not_found(format!("{} not found for {}", self.table_name, id).as_str())),
            },
            None => Err(LibraryError::not_found(format!("{} not found for {}", self.table_name, id).as_str())),
        }
    }

    pub(crate) async fn delete(&self, id: &str) -> LibraryResult<usize> {
        match self.client.delete_item()
            .table_name(self.table_name.as_str())
            .key(self.key_name.as_str(), AttributeValue::S(id.to_string()))
            .condition_expression("attribute_exists(#key)")
            .expression_attribute_names("#key", self.key_name.as_str())
            .send()
            .await {
            Ok(_) => Ok(1),
            Err(SdkError::ServiceError(ctx)) if ctx.err().is_conditional_check_failed_exception() => {
                Err(LibraryError::not_found(format!("{} not found for {}", self.table_name, id).as_str()))
            }
            Err(err) => Err(LibraryError::from(err)),
        }
    }

    // Results come back in range-key order of the index; other predicate keys become a
    // filter expression evaluated by DynamoDB.
    // Note you cannot use certain reserved words per https://docs.aws.amazon.com/amazondynamodb/latest/developerguide/ReservedWords.html
    // so every attribute goes through an expression attribute name.
    pub(crate) async fn query<T: DeserializeOwned>(&self, index_name: &str, hash_key: (&str, &str),
                                                   predicate: &HashMap<String, String>,
                                                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<T>> {
        let out = self.index_request(index_name, hash_key, predicate)
            .limit(cmp::min(page_size, 500) as i32)
            .set_exclusive_start_key(to_ddb_page(page))
            .send()
            .await?;
        let records = out.items().unwrap_or_default().iter()
            .map(parse_entity)
            .collect::<LibraryResult<Vec<T>>>()?;
        Ok(from_ddb(page, page_size, out.last_evaluated_key(), records))
    }

    // exact match on both keys of an index; a range key cannot be used in a filter
    pub(crate) async fn query_range<T: DeserializeOwned>(&self, index_name: &str, hash_key: (&str, &str),
                                                         range_key: (&str, &str)) -> LibraryResult<Vec<T>> {
        let (hash_name, hash_value) = hash_key;
        let (range_name, range_value) = range_key;
        let out = self.client
            .query()
            .table_name(self.table_name.as_str())
            .index_name(index_name)
            .consistent_read(false)
            .key_condition_expression("#hash = :hash AND #range = :range")
            .expression_attribute_names("#hash", hash_name)
            .expression_attribute_names("#range", range_name)
            .expression_attribute_values(":hash", AttributeValue::S(hash_value.to_string()))
            .expression_attribute_values(":range", AttributeValue::S(range_value.to_string()))
            .send()
            .await?;
        out.items().unwrap_or_default().iter()
            .map(parse_entity)
            .collect()
    }

    pub(crate) async fn count(&self, index_name: &str, hash_key: (&str, &str),
                              predicate: &HashMap<String, String>) -> LibraryResult<usize> {
        let mut total = 0;
        let mut start_key = None;
        loop {
            let out = self.index_request(index_name, hash_key, predicate)
                .projection_expression("#key")
                .expression_attribute_names("#key", self.key_name.as_str())
                .set_exclusive_start_key(start_key)
                .send()
                .await?;
            total += out.items().map(|items| items.len()).unwrap_or_default();
            match out.last_evaluated_key() {
                Some(key) if !key.is_empty() => start_key = Some(key.clone()),
                _ => return Ok(total),
            }
        }
    }

    fn index_request(&self, index_name: &str, hash_key: (&str, &str),
                     predicate: &HashMap<String, String>) -> QueryFluentBuilder {
        let (hash_name, hash_value) = hash_key;
        let mut request = self.client
            .query()
            .table_name(self.table_name.as_str())
            .index_name(index_name)
            .consistent_read(false)
            .key_condition_expression(format!("#{} = :{}", hash_name, hash_name))
            .expression_attribute_names(format!("#{}", hash_name), hash_name)
            .expression_attribute_values(format!(":{}", hash_name), AttributeValue::S(hash_value.to_string()));
        let mut filter_expr = String::new();
        // the hash key is already in the key condition and cannot appear in a filter
        let filters = predicate.iter().filter(|(k, _)| split_predicate_key(k).0 != hash_name);
        for (i, (k, v)) in filters.enumerate() {
            let field = add_filter_expr(k.as_str(), i, &mut filter_expr);
            request = request
                .expression_attribute_names(format!("#{}", field), field)
                .expression_attribute_values(format!(":f{}", i), AttributeValue::S(v.to_string()));
        }
        if !filter_expr.is_empty() {
            request = request.filter_expression(filter_expr);
        }
        request
    }
}

pub(crate) fn add_filter_expr<'a>(k: &'a str, i: usize, filter_expr: &mut String) -> &'a str {
    let (field, op) = split_predicate_key(k);
    if !filter_expr.is_empty() {
        filter_expr.push_str(" AND ");
    }
    filter_expr.push_str(format!("#{} {} :f{}", field, op, i).as_str());
    field
}

pub(crate) fn parse_item(value: Value) -> Result<HashMap<String, AttributeValue>, String> {
    match value_to_item(value) {
        AttributeValue::M(map) => Ok(map),
        other => Err(format!("failed to parse {:?}", other)),
    }
}

pub(crate) fn parse_entity<T: DeserializeOwned>(map: &HashMap<String, AttributeValue>) -> LibraryResult<T> {
    let val = item_to_value(&AttributeValue::M(map.clone()));
    Ok(serde_json::from_value(val)?)
}

pub(crate) fn to_ddb_page(page: Option<&str>) -> Option<HashMap<String, AttributeValue>> {
    if let Some(page) = page {
        if let Ok(str_map) = serde_json::from_str::<HashMap<String, String>>(page) {
            let attr_map = str_map.into_iter()
                .map(|(k, v)| (k, AttributeValue::S(v)))
                .collect();
            return Some(attr_map);
        }
    }
    None
}

pub(crate) fn from_ddb<T>(page: Option<&str>, page_size: usize,
                          last_evaluated_key: Option<&HashMap<String, AttributeValue>>,
                          records: Vec<T>) -> PaginatedResult<T> {
    let mut next_page: Option<String> = None;
    if let Some(attr_map) = last_evaluated_key {
        let mut str_map = HashMap::new();
        for (k, v) in attr_map {
            if let AttributeValue::S(val) = v {
                str_map.insert(k.clone(), val.to_string());
            }
        }
        if let Ok(j) = serde_json::to_string(&str_map) {
            next_page = Some(j);
        }
    }
    PaginatedResult::new(page, page_size, next_page, records)
}

fn value_to_item(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(a) => AttributeValue::L(a.into_iter().map(value_to_item).collect()),
        Value::Object(o) => {
            AttributeValue::M(o.into_iter().map(|(k, v)| (k, value_to_item(v))).collect())
        }
    }
}

fn item_to_value(item: &AttributeValue) -> Value {
    match item {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => {
            if let Ok(i) = n.parse::<i64>() {
                Value::from(i)
            } else {
                n.parse::<f64>().ok().and_then(Number::from_f64).map(Value::Number).unwrap_or(Value::Null)
            }
        }
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::L(list) => Value::Array(list.iter().map(item_to_value).collect()),
        AttributeValue::Ss(list) => Value::Array(list.iter().map(|s| Value::String(s.clone())).collect()),
        AttributeValue::M(map) => {
            Value::Object(map.iter().map(|(k, v)| (k.clone(), item_to_value(v))).collect())
        }
        _ => Value::Null,
    }
}

// helper method to build db-client for the selected store
pub(crate) async fn build_db_client(store: RepositoryStore) -> Client {
    match store {
        RepositoryStore::DynamoDB => {
            //Get config from environment.
            let config = aws_config::load_from_env().await;
            Client::new(&config)
        }
        RepositoryStore::LocalDynamoDB | RepositoryStore::InMemory => {
            // See https://docs.aws.amazon.com/sdk-for-rust/latest/dg/dynamodb-local.html
            let endpoint = std::env::var("DYNAMODB_ENDPOINT").unwrap_or_else(|_| LOCAL_ENDPOINT.to_string());
            let dynamodb_local_config = aws_sdk_dynamodb::Config::builder()
                .region(Region::new("local"))
                .credentials_provider(
                    Credentials::new("AKIDLOCALSTACK", "localstacksecret", None, None, "faked"))
                .endpoint_url(endpoint)
                .build();
            Client::from_conf(dynamodb_local_config)
        }
    }
}

// helper method to build sns-client from the environment
pub async fn build_sns_client() -> aws_sdk_sns::Client {
    let config = aws_config::load_from_env().await;
    aws_sdk_sns::Client::new(&config)
}

// required to enable CloudWatch error logging by the runtime
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // disable printing the name of the module in every log line.
        .with_target(false)
        // ANSI color codes show up in a confusing manner in CloudWatch logs.
        .with_ansi(false)
        // CloudWatch adds the ingestion time.
        .without_time()
        .json()
        .init();
}

impl From<SdkError<PutItemError>> for LibraryError {
    fn from(err: SdkError<PutItemError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

impl From<SdkError<DeleteItemError>> for LibraryError {
    fn from(err: SdkError<DeleteItemError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

impl From<SdkError<QueryError>> for LibraryError {
    fn from(err: SdkError<QueryError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

fn retryable_sdk_error<T>(err: &SdkError<T>) -> (bool, Option<String>) {
    match err {
        SdkError::ConstructionFailure(_) => { (false, Some("ConstructionFailure".to_string())) }
        SdkError::TimeoutError(_) => { (true, Some("TimeoutError".to_string())) }
        SdkError::DispatchFailure(_) => { (true, Some("DispatchFailure".to_string())) }
        SdkError::ResponseError { .. } => { (true, Some("ResponseError".to_string())) }
        SdkError::ServiceError(ctx) => {
            (ctx.raw().http().status().is_server_error() || has_exceeded_limit(ctx.raw().http().body().bytes()),
             Some(ctx.raw().http().status().to_string()))
        }
        _ => { (true, Some("Unknown".to_string())) }
    }
}

// ProvisionedThroughputExceeded / RequestLimitExceeded
fn has_exceeded_limit(opts: Option<&[u8]>) -> bool {
    match opts {
        Some(b) => b.windows(6).any(|w| w == b"ceeded"),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use aws_sdk_dynamodb::types::AttributeValue;
    use serde_json::json;
    use crate::utils::ddb::{add_filter_expr, from_ddb, has_exceeded_limit, item_to_value, parse_item, to_ddb_page};

    #[tokio::test]
    async fn test_should_build_filter_expression_with_operators() {
        let mut expr = String::new();
        assert_eq!("borrower_id", add_filter_expr("borrower_id", 0, &mut expr));
        assert_eq!("due_back", add_filter_expr("due_back:<=", 1, &mut expr));
        assert_eq!("#borrower_id = :f0 AND #due_back <= :f1", expr.as_str());
    }

    #[tokio::test]
    async fn test_should_convert_items_both_ways() {
        let val = json!({"instance_id": "i1", "version": 3, "due_back": null, "genre_ids": ["g1"], "flag": true});
        let item = parse_item(val.clone()).expect("should parse");
        assert_eq!(Some(&AttributeValue::N("3".to_string())), item.get("version"));
        let back = item_to_value(&AttributeValue::M(item));
        assert_eq!(val, back);
    }

    #[tokio::test]
    async fn test_should_round_trip_page_tokens() {
        let key = HashMap::from([("instance_id".to_string(), AttributeValue::S("i1".to_string()))]);
        let res = from_ddb::<u8>(None, 10, Some(&key), vec![]);
        let token = res.next_page.expect("should have next page");
        let start = to_ddb_page(Some(token.as_str())).expect("should decode");
        assert_eq!(key, start);
        assert_eq!(None, to_ddb_page(Some("not json")));
    }

    #[tokio::test]
    async fn test_should_detect_exceeded_limit() {
        assert!(has_exceeded_limit(Some(&b"ProvisionedThroughputExceededException"[..])));
        assert!(!has_exceeded_limit(Some(&b"abc"[..])));
        assert!(!has_exceeded_limit(None));
    }
}
