mod catalog;
mod checkout;
mod helpers;
mod misc;
mod mocks;
