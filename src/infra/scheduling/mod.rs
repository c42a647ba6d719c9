pub mod cal_com_client;
