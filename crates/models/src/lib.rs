pub mod errors;
pub mod db;
pub mod vehicle;
pub mod collaborator;
pub mod service_record;
pub mod part;
pub mod user;
pub mod graph;

#[cfg(test)]
mod tests;
