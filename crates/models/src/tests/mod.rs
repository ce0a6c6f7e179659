/// CRUD operations tests for all models
pub mod crud_tests;
