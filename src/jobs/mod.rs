pub mod car_sweep;
