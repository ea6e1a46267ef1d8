pub mod cred_issuance;
