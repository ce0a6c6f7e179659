pub mod seaorm;

pub use seaorm::SeaOrmAccountRepository;
