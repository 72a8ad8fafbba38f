mod test_broadcast_gating;
